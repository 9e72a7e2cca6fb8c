use serde::Deserialize;

use super::AugmentationResult;

#[derive(Debug, thiserror::Error)]
pub(super) enum ParseError {
    #[error("no JSON object in payload")]
    NoJsonObject,
    #[error("malformed JSON payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct WirePayload {
    consistency_score: f32,
    #[serde(default)]
    conflict_points: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    reasoning_path: Option<String>,
}

/// Parses the structured payload the analysis service returns. Services
/// often wrap the JSON in fenced code blocks or prose; anything outside
/// the outermost object is discarded before parsing. The consistency
/// score is clamped to the documented 0-10 scale.
pub(super) fn parse_payload(raw: &str) -> Result<AugmentationResult, ParseError> {
    let body = extract_object(raw).ok_or(ParseError::NoJsonObject)?;
    let wire: WirePayload = serde_json::from_str(body)?;

    Ok(AugmentationResult {
        consistency_score: wire.consistency_score.clamp(0.0, 10.0),
        conflict_points: wire.conflict_points,
        suggestions: wire.suggestions,
        reasoning_path: wire
            .reasoning_path
            .filter(|reasoning| !reasoning.trim().is_empty()),
    })
}

/// The span from the first `{` to the last `}`, which strips ```-fences
/// and surrounding commentary in one step.
fn extract_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
