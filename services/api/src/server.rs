use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::provider::HttpAnalysisProvider;
use crate::routes::with_checkpoint_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

use invest_check::augment::{AnalysisProvider, RetryPolicy};
use invest_check::config::AppConfig;
use invest_check::engine::router::CheckpointState;
use invest_check::error::AppError;
use invest_check::{telemetry, DecisionEngine};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let provider: Option<Arc<dyn AnalysisProvider>> =
        match HttpAnalysisProvider::from_config(&config.analysis) {
            Ok(Some(provider)) => {
                info!("external analysis augmentation enabled");
                Some(Arc::new(provider))
            }
            Ok(None) => {
                info!("no analysis service configured, evaluating locally only");
                None
            }
            Err(err) => {
                warn!(%err, "analysis client unavailable, evaluating locally only");
                None
            }
        };

    let mut checkpoint_state =
        CheckpointState::new(Arc::new(DecisionEngine::with_defaults()), provider);
    checkpoint_state.policy = RetryPolicy {
        attempt_timeout: config.analysis.timeout,
        ..RetryPolicy::default()
    };

    let app = with_checkpoint_routes(checkpoint_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "decision checkpoint service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
