use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::Stage;

/// Rubric configuration for the checkpoint engine. Loaded once at startup
/// and injected; never mutated during evaluation. The numeric values are
/// hand-tuned in the product and deliberately kept as plain fields rather
/// than re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub stage_weights: StageWeights,
    pub bands: RatingBands,
    pub adjustment: AdjustmentThresholds,
    pub integration: IntegrationBounds,
    /// Maximum entries in the final recommendation list.
    pub recommendation_cap: usize,
    /// Maximum entries in the overall strength/weakness lists.
    pub notes_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stage_weights: StageWeights::default(),
            bands: RatingBands::default(),
            adjustment: AdjustmentThresholds::default(),
            integration: IntegrationBounds::default(),
            recommendation_cap: 6,
            notes_cap: 8,
        }
    }
}

/// Fixed per-stage weights. The canonical table sums to 1.0; the
/// aggregator re-normalises over whichever stages are actually present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageWeights(pub BTreeMap<Stage, f32>);

impl StageWeights {
    pub fn weight(&self, stage: Stage) -> f32 {
        self.0.get(&stage).copied().unwrap_or(0.0)
    }
}

impl Default for StageWeights {
    fn default() -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(Stage::Goals, 0.20);
        weights.insert(Stage::Method, 0.15);
        weights.insert(Stage::TradeRules, 0.20);
        weights.insert(Stage::RiskControl, 0.25);
        weights.insert(Stage::Verification, 0.10);
        weights.insert(Stage::BiasCheck, 0.05);
        weights.insert(Stage::Documentation, 0.05);
        Self(weights)
    }
}

/// Inclusive lower bounds of the upper three rating bands. A boundary
/// value belongs to the higher band: 55 is already "cautious".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBands {
    pub cautious_floor: u8,
    pub stable_floor: u8,
    pub system_floor: u8,
}

impl Default for RatingBands {
    fn default() -> Self {
        Self {
            cautious_floor: 55,
            stable_floor: 70,
            system_floor: 85,
        }
    }
}

/// Thresholds for the cross-field rating override policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentThresholds {
    /// Liquidity score below this with a short horizon downgrades one band.
    pub liquidity_floor: u8,
    /// Risk-management stage score below this with an aggressive appetite
    /// forces the rating to high-risk.
    pub risk_control_floor: u8,
    /// Yield target above this (percent) with a conservative appetite
    /// downgrades one band.
    pub conservative_yield_cap_pct: f32,
}

impl Default for AdjustmentThresholds {
    fn default() -> Self {
        Self {
            liquidity_floor: 50,
            risk_control_floor: 40,
            conservative_yield_cap_pct: 15.0,
        }
    }
}

/// Bounds on how far external augmentation may move a stage score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationBounds {
    /// Neutral midpoint of the 0-10 consistency scale.
    pub neutral_midpoint: f32,
    /// Maximum absolute stage-score adjustment.
    pub max_adjustment: f32,
    /// Conflict points appended as weaknesses per kind, at most.
    pub max_conflicts_per_kind: usize,
}

impl Default for IntegrationBounds {
    fn default() -> Self {
        Self {
            neutral_midpoint: 5.0,
            max_adjustment: 15.0,
            max_conflicts_per_kind: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_weights_sum_to_one() {
        let weights = StageWeights::default();
        let sum: f32 = Stage::ALL.iter().map(|stage| weights.weight(*stage)).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bands_are_contiguous_and_ordered() {
        let bands = RatingBands::default();
        assert!(bands.cautious_floor < bands.stable_floor);
        assert!(bands.stable_floor < bands.system_floor);
        assert!(bands.system_floor <= 100);
    }
}
