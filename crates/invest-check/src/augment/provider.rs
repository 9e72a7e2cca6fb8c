use async_trait::async_trait;

use super::AugmentationKind;

/// Transport-agnostic seam to the external analysis service: submit a
/// prompt, receive structured text. Implemented over HTTP in the service
/// shell and by in-process stubs in tests; the engine only depends on
/// this capability plus a configurable timeout.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn request(&self, kind: AugmentationKind, prompt: &str) -> Result<String, ProviderError>;
}

/// Transport-level failure. Timeouts are enforced by the caller, not the
/// provider, so attempts that hang are cut off uniformly.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("analysis transport failed: {0}")]
    Transport(String),
    #[error("analysis service rejected the request: {0}")]
    Rejected(String),
    #[error("analysis service unavailable")]
    Unavailable,
}
