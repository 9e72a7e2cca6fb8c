use std::collections::BTreeMap;

use super::KindOutcome;
use crate::engine::config::IntegrationBounds;
use crate::engine::domain::{AugmentationDetails, AugmentationSource, Stage, StageScore};

/// What integration left behind for the later pipeline steps: the pooled
/// suggestions for the recommender and whether any kind was served live.
#[derive(Debug, Clone, Default)]
pub struct IntegrationReport {
    pub suggestions: Vec<String>,
    pub augmented: bool,
}

/// Merges augmentation outcomes into the stage scores. Each kind adjusts
/// its associated stage by a linear function of the distance from the
/// neutral midpoint, capped at the configured bound, and the result is
/// re-clamped to [0,100] — external input can refine a local score but
/// never override its bounds. At most `max_conflicts_per_kind` conflict
/// points are appended as weaknesses.
pub fn integrate(
    stage_scores: &mut BTreeMap<Stage, StageScore>,
    outcomes: &[KindOutcome],
    bounds: &IntegrationBounds,
) -> IntegrationReport {
    let mut report = IntegrationReport::default();

    for outcome in outcomes {
        let Some(stage_score) = stage_scores.get_mut(&outcome.kind.stage()) else {
            continue;
        };

        let span = bounds.neutral_midpoint.max(10.0 - bounds.neutral_midpoint);
        let offset = outcome.result.consistency_score - bounds.neutral_midpoint;
        let adjustment = (offset / span * bounds.max_adjustment).round() as i32;

        let adjusted = (i32::from(stage_score.score) + adjustment).clamp(0, 100);
        stage_score.score = adjusted as u8;

        for conflict in outcome
            .result
            .conflict_points
            .iter()
            .filter(|conflict| !conflict.trim().is_empty())
            .take(bounds.max_conflicts_per_kind)
        {
            stage_score.weaknesses.push(conflict.clone());
        }

        stage_score.augmentation = Some(AugmentationDetails {
            source: outcome.source,
            consistency_score: outcome.result.consistency_score,
            adjustment,
            reasoning: outcome.result.reasoning_path.clone(),
        });

        report
            .suggestions
            .extend(outcome.result.suggestions.iter().cloned());
        report.augmented |= outcome.source == AugmentationSource::Service;
    }

    report
}
