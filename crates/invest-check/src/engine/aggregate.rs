use std::collections::BTreeMap;

use super::config::{RatingBands, StageWeights};
use super::domain::{Rating, Stage, StageScore};

/// Weighted total over the stages present. A partial stage map is
/// re-normalised by the sum of the weights actually present rather than
/// treating missing stages as zero, so partially evaluated decisions are
/// not systematically under-scored.
pub fn aggregate(stage_scores: &BTreeMap<Stage, StageScore>, weights: &StageWeights) -> u8 {
    let mut weighted = 0.0f64;
    let mut weight_sum = 0.0f64;

    for (stage, score) in stage_scores {
        let weight = f64::from(weights.weight(*stage));
        if weight <= 0.0 {
            continue;
        }
        weighted += f64::from(score.score) * weight;
        weight_sum += weight;
    }

    if weight_sum <= 0.0 {
        return 0;
    }

    (weighted / weight_sum).round().clamp(0.0, 100.0) as u8
}

/// Maps a total score onto the four rating bands. Boundary values belong
/// to the higher band: 55 is already cautious, 85 already system.
pub fn classify(total: u8, bands: &RatingBands) -> Rating {
    if total >= bands.system_floor {
        Rating::System
    } else if total >= bands.stable_floor {
        Rating::Stable
    } else if total >= bands.cautious_floor {
        Rating::Cautious
    } else {
        Rating::HighRisk
    }
}
