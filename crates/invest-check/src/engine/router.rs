use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::AnswerSet;
use super::{DecisionEngine, EngineError};
use crate::augment::{AnalysisProvider, Augmentor, RetryPolicy};
use crate::lang::Language;
use crate::risk::{score_risk_profile, RiskAnswerSet, RiskProfileError};

/// Shared state for the checkpoint endpoints. The provider is optional;
/// without one, evaluations run purely locally.
#[derive(Clone)]
pub struct CheckpointState {
    pub engine: Arc<DecisionEngine>,
    pub provider: Option<Arc<dyn AnalysisProvider>>,
    pub policy: RetryPolicy,
}

impl CheckpointState {
    pub fn new(engine: Arc<DecisionEngine>, provider: Option<Arc<dyn AnalysisProvider>>) -> Self {
        Self {
            engine,
            provider,
            policy: RetryPolicy::default(),
        }
    }
}

/// Router builder exposing HTTP endpoints for checkpoint evaluation and
/// risk profiling.
pub fn checkpoint_router(state: CheckpointState) -> Router {
    Router::new()
        .route("/api/v1/checkpoints/evaluate", post(evaluate_handler))
        .route("/api/v1/risk-profiles", post(risk_profile_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    answers: AnswerSet,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RiskProfileRequest {
    answers: RiskAnswerSet,
    #[serde(default)]
    language: Option<String>,
}

fn requested_language(tag: Option<&str>) -> Language {
    tag.map(Language::from_tag).unwrap_or_default()
}

pub(crate) async fn evaluate_handler(
    State(state): State<CheckpointState>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response {
    let language = requested_language(request.language.as_deref());
    let augmentor = state
        .provider
        .as_ref()
        .map(|provider| Augmentor::with_policy(Arc::clone(provider), language, state.policy));

    match state.engine.evaluate(&request.answers, augmentor.as_ref()).await {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(EngineError::IncompleteAnswers { fields }) => {
            let payload = json!({
                "error": "required answers missing or invalid",
                "fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn risk_profile_handler(
    State(_state): State<CheckpointState>,
    axum::Json(request): axum::Json<RiskProfileRequest>,
) -> Response {
    let language = requested_language(request.language.as_deref());
    match score_risk_profile(&request.answers, language) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(RiskProfileError::IncompleteAnswers { fields }) => {
            let payload = json!({
                "error": "no scoreable risk answers",
                "fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
