use async_trait::async_trait;
use serde_json::json;

use invest_check::augment::{AnalysisProvider, AugmentationKind, ProviderError};
use invest_check::config::AnalysisServiceConfig;

/// HTTP-backed analysis provider. Posts the prompt to the configured
/// endpoint with bearer authentication and hands the raw text back to the
/// engine, which does its own payload extraction. The per-attempt timeout
/// is enforced by the engine; the client only carries a slightly larger
/// transport-level ceiling.
pub(crate) struct HttpAnalysisProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpAnalysisProvider {
    /// Builds the provider from configuration. Returns `Ok(None)` when no
    /// analysis service is configured, so the caller runs local-only.
    pub(crate) fn from_config(
        config: &AnalysisServiceConfig,
    ) -> Result<Option<Self>, ProviderError> {
        let Some((endpoint, api_key)) = config.credentials() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout.saturating_mul(2))
            .build()
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        Ok(Some(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }))
    }

    fn extract_text(body: String) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            for key in ["output", "content", "text", "response"] {
                if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                    return text.to_string();
                }
            }
        }
        body
    }
}

#[async_trait]
impl AnalysisProvider for HttpAnalysisProvider {
    async fn request(&self, kind: AugmentationKind, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "kind": kind.label(),
                "prompt": prompt,
            }))
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::Unavailable);
        }
        if !status.is_success() {
            return Err(ProviderError::Rejected(format!("status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        Ok(Self::extract_text(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(endpoint: Option<&str>, key: Option<&str>) -> AnalysisServiceConfig {
        AnalysisServiceConfig {
            endpoint: endpoint.map(str::to_string),
            api_key: key.map(str::to_string),
            timeout: Duration::from_secs(15),
        }
    }

    #[test]
    fn unconfigured_service_builds_no_provider() {
        let provider = HttpAnalysisProvider::from_config(&config(None, None))
            .expect("construction succeeds");
        assert!(provider.is_none());

        let partial = HttpAnalysisProvider::from_config(&config(
            Some("https://analysis.example/v1"),
            None,
        ))
        .expect("construction succeeds");
        assert!(partial.is_none());
    }

    #[test]
    fn configured_service_builds_a_provider() {
        let provider = HttpAnalysisProvider::from_config(&config(
            Some("https://analysis.example/v1"),
            Some("secret"),
        ))
        .expect("construction succeeds");
        assert!(provider.is_some());
    }

    #[test]
    fn wrapped_response_text_is_unwrapped() {
        let wrapped = serde_json::json!({ "output": "{\"consistency_score\": 7}" }).to_string();
        assert_eq!(
            HttpAnalysisProvider::extract_text(wrapped),
            "{\"consistency_score\": 7}"
        );
    }

    #[test]
    fn bare_response_text_passes_through() {
        let bare = "{\"consistency_score\": 7}".to_string();
        assert_eq!(HttpAnalysisProvider::extract_text(bare.clone()), bare);
    }
}
