use std::collections::BTreeMap;

use super::config::EngineConfig;
use super::domain::{Horizon, Rating, RiskAppetite, ScoreSignals, Stage, StageScore};

/// Outcome of the dynamic adjustment layer: the possibly shifted rating
/// plus the explanatory recommendations the shifts produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub rating: Rating,
    pub notes: Vec<String>,
}

/// Applies the cross-field override policies to an already classified
/// rating. Policies run in a fixed order so outcomes are reproducible:
/// 1. long horizon upgrades cautious/stable one band;
/// 2. short horizon with a thin liquidity buffer downgrades one band;
/// 3. aggressive appetite with a weak risk-management stage forces
///    high-risk outright;
/// 4. conservative appetite with a high yield target downgrades one band.
/// A band shift is always to the adjacent ordinal and never leaves the
/// four-value range.
pub fn adjust_rating(
    base: Rating,
    signals: &ScoreSignals,
    stage_scores: &BTreeMap<Stage, StageScore>,
    config: &EngineConfig,
) -> Adjustment {
    let thresholds = &config.adjustment;
    let mut rating = base;
    let mut notes = Vec::new();

    if signals.horizon == Some(Horizon::Long)
        && matches!(rating, Rating::Cautious | Rating::Stable)
    {
        rating = rating.upgraded();
        notes.push(
            "A long horizon absorbs short-term noise; the rating was lifted one band."
                .to_string(),
        );
    }

    if signals.horizon == Some(Horizon::Short) {
        if let Some(liquidity) = signals.liquidity_score {
            if liquidity < thresholds.liquidity_floor {
                rating = rating.downgraded();
                notes.push(
                    "A short horizon with a thin liquidity buffer lowers the rating one band."
                        .to_string(),
                );
            }
        }
    }

    if signals.risk_appetite == Some(RiskAppetite::Aggressive) {
        let risk_stage = stage_scores
            .get(&Stage::RiskControl)
            .map(|score| score.score)
            .unwrap_or(0);
        if risk_stage < thresholds.risk_control_floor {
            rating = Rating::HighRisk;
            notes.push(
                "An aggressive appetite without risk management caps the rating at high-risk."
                    .to_string(),
            );
        }
    }

    if signals.risk_appetite == Some(RiskAppetite::Conservative) {
        if let Some(target) = signals.yield_target_pct {
            if target > thresholds.conservative_yield_cap_pct {
                rating = rating.downgraded();
                notes.push(
                    "Stress-test the plan: the yield target is out of step with a conservative appetite."
                        .to_string(),
                );
            }
        }
    }

    Adjustment { rating, notes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_scores(risk_control: u8) -> BTreeMap<Stage, StageScore> {
        let mut scores = BTreeMap::new();
        scores.insert(Stage::RiskControl, StageScore::new(risk_control));
        scores
    }

    fn signals() -> ScoreSignals {
        ScoreSignals::default()
    }

    #[test]
    fn long_horizon_lifts_cautious_one_band() {
        let config = EngineConfig::default();
        let mut signals = signals();
        signals.horizon = Some(Horizon::Long);

        let adjusted = adjust_rating(Rating::Cautious, &signals, &stage_scores(70), &config);
        assert_eq!(adjusted.rating, Rating::Stable);
        assert_eq!(adjusted.notes.len(), 1);
    }

    #[test]
    fn long_horizon_never_upgrades_past_system() {
        let config = EngineConfig::default();
        let mut signals = signals();
        signals.horizon = Some(Horizon::Long);

        let adjusted = adjust_rating(Rating::System, &signals, &stage_scores(70), &config);
        assert_eq!(adjusted.rating, Rating::System);
        assert!(adjusted.notes.is_empty());
    }

    #[test]
    fn short_horizon_with_thin_liquidity_downgrades() {
        let config = EngineConfig::default();
        let mut signals = signals();
        signals.horizon = Some(Horizon::Short);
        signals.liquidity_score = Some(35);

        let adjusted = adjust_rating(Rating::Stable, &signals, &stage_scores(70), &config);
        assert_eq!(adjusted.rating, Rating::Cautious);
    }

    #[test]
    fn aggressive_appetite_with_weak_risk_stage_forces_high_risk() {
        let config = EngineConfig::default();
        let mut signals = signals();
        signals.risk_appetite = Some(RiskAppetite::Aggressive);

        let adjusted = adjust_rating(Rating::System, &signals, &stage_scores(30), &config);
        assert_eq!(adjusted.rating, Rating::HighRisk);
    }

    #[test]
    fn conservative_appetite_with_high_yield_target_downgrades_once() {
        let config = EngineConfig::default();
        let mut signals = signals();
        signals.risk_appetite = Some(RiskAppetite::Conservative);
        signals.yield_target_pct = Some(25.0);

        let adjusted = adjust_rating(Rating::Stable, &signals, &stage_scores(70), &config);
        assert_eq!(adjusted.rating, Rating::Cautious);
        assert!(adjusted.notes[0].contains("Stress-test"));
    }

    #[test]
    fn downgrades_never_fall_below_high_risk() {
        let config = EngineConfig::default();
        let mut signals = signals();
        signals.horizon = Some(Horizon::Short);
        signals.liquidity_score = Some(10);
        signals.risk_appetite = Some(RiskAppetite::Conservative);
        signals.yield_target_pct = Some(40.0);

        let adjusted = adjust_rating(Rating::Cautious, &signals, &stage_scores(70), &config);
        assert_eq!(adjusted.rating, Rating::HighRisk);
    }
}
