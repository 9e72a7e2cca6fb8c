use super::{AugmentationInputs, AugmentationKind, AugmentationResult};
use crate::engine::stages::first_percent;

/// Deterministic, rule-based stand-in for one analysis kind. Inspects the
/// same inputs the prompt was built from and always returns a well-formed
/// result with a neutral-to-moderate consistency score; it never fails.
pub(super) fn local_fallback(
    kind: AugmentationKind,
    inputs: &AugmentationInputs,
) -> AugmentationResult {
    match kind {
        AugmentationKind::LogicConsistency => logic_fallback(inputs),
        AugmentationKind::RiskConsistency => risk_fallback(inputs),
        AugmentationKind::CognitiveBias => bias_fallback(inputs),
    }
}

fn logic_fallback(inputs: &AugmentationInputs) -> AugmentationResult {
    let mut conflicts = Vec::new();
    let mut suggestions = Vec::new();

    let rules = [
        inputs.entry_rule.as_deref(),
        inputs.exit_rule.as_deref(),
        inputs.stop_loss_rule.as_deref(),
    ];
    let quantified = rules
        .iter()
        .filter(|rule| rule.and_then(first_percent).is_some())
        .count();

    if inputs.stop_loss_rule.is_none() {
        conflicts.push("There is no stop-loss rule to check the exit rule against.".to_string());
    }

    if let (Some(exit), Some(stop)) = (
        inputs.exit_rule.as_deref().and_then(first_percent),
        inputs.stop_loss_rule.as_deref().and_then(first_percent),
    ) {
        if stop > exit {
            conflicts.push(
                "The stop-loss is wider than the profit target, so losing trades outweigh winners."
                    .to_string(),
            );
        }
    }

    if quantified < rules.len() {
        suggestions
            .push("Quantify every entry, exit, and stop trigger with a figure.".to_string());
    }

    AugmentationResult {
        consistency_score: (4.0 + 1.2 * quantified as f32).min(8.0),
        conflict_points: conflicts,
        suggestions,
        reasoning_path: None,
    }
}

fn risk_fallback(inputs: &AugmentationInputs) -> AugmentationResult {
    let mut conflicts = Vec::new();
    let mut suggestions = Vec::new();
    let mut score = 4.0f32;

    score += inputs.mitigations.len().min(3) as f32;

    if let Some(position) = inputs.position_size.as_deref().and_then(first_percent) {
        score += 1.0;
        if position > 50.0 {
            conflicts.push(format!(
                "A {position:.0}% position concentrates the portfolio in a single outcome."
            ));
        }
    }

    let aggressive = inputs
        .risk_appetite
        .as_deref()
        .map(|appetite| appetite.to_ascii_lowercase().starts_with("aggressive"))
        .unwrap_or(false);
    if aggressive && inputs.mitigations.len() < 2 {
        conflicts.push(
            "An aggressive appetite is paired with almost no mitigation measures.".to_string(),
        );
        suggestions
            .push("Add a second mitigation before sizing up, e.g. a hard position limit.".to_string());
    }

    AugmentationResult {
        consistency_score: score.clamp(0.0, 8.0),
        conflict_points: conflicts,
        suggestions,
        reasoning_path: None,
    }
}

fn bias_fallback(inputs: &AugmentationInputs) -> AugmentationResult {
    let mut conflicts = Vec::new();
    let mut suggestions = Vec::new();
    let mut score = 5.0f32;

    if inputs.biases_reviewed.len() >= 2 {
        score += 1.5;
    }

    let contrarian = inputs
        .contrarian_view
        .as_deref()
        .map(|raw| {
            let value = raw.trim().to_ascii_lowercase();
            value == "yes" || value == "y" || value.contains("是")
        })
        .unwrap_or(false);
    if contrarian {
        score += 1.5;
    } else {
        conflicts.push("No contrarian view was sought before committing.".to_string());
        suggestions.push("Ask someone to argue the other side of this trade.".to_string());
    }

    if let Some(state) = inputs.emotional_state.as_deref() {
        let normalized = state.to_ascii_lowercase();
        if ["anxious", "excited", "fomo", "焦虑", "兴奋"]
            .iter()
            .any(|keyword| normalized.contains(keyword))
        {
            score -= 2.0;
            conflicts.push("The decision is being taken in an elevated emotional state.".to_string());
        }
    }

    AugmentationResult {
        consistency_score: score.clamp(0.0, 10.0),
        conflict_points: conflicts,
        suggestions,
        reasoning_path: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantified_inputs() -> AugmentationInputs {
        AugmentationInputs {
            entry_rule: Some("Buy after a 10% pullback".to_string()),
            exit_rule: Some("Take profit at 20%".to_string()),
            stop_loss_rule: Some("Stop out at 8%".to_string()),
            ..AugmentationInputs::default()
        }
    }

    #[test]
    fn fallbacks_are_deterministic_and_bounded() {
        for kind in AugmentationKind::ALL {
            let first = local_fallback(kind, &quantified_inputs());
            let second = local_fallback(kind, &quantified_inputs());
            assert_eq!(first, second);
            assert!((0.0..=10.0).contains(&first.consistency_score));
        }
    }

    #[test]
    fn quantified_rules_raise_the_logic_score() {
        let quantified = local_fallback(AugmentationKind::LogicConsistency, &quantified_inputs());
        let vague = local_fallback(
            AugmentationKind::LogicConsistency,
            &AugmentationInputs::default(),
        );
        assert!(quantified.consistency_score > vague.consistency_score);
        assert!(quantified.conflict_points.is_empty());
    }

    #[test]
    fn wide_stop_against_narrow_target_is_flagged() {
        let mut inputs = quantified_inputs();
        inputs.exit_rule = Some("Take profit at 5%".to_string());
        inputs.stop_loss_rule = Some("Stop out at 15%".to_string());
        let result = local_fallback(AugmentationKind::LogicConsistency, &inputs);
        assert!(result
            .conflict_points
            .iter()
            .any(|conflict| conflict.contains("wider than the profit target")));
    }

    #[test]
    fn aggressive_without_mitigation_is_flagged() {
        let inputs = AugmentationInputs {
            risk_appetite: Some("Aggressive".to_string()),
            ..AugmentationInputs::default()
        };
        let result = local_fallback(AugmentationKind::RiskConsistency, &inputs);
        assert!(!result.conflict_points.is_empty());
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn elevated_emotion_lowers_the_bias_score() {
        let calm = local_fallback(AugmentationKind::CognitiveBias, &AugmentationInputs::default());
        let excited = local_fallback(
            AugmentationKind::CognitiveBias,
            &AugmentationInputs {
                emotional_state: Some("Excited".to_string()),
                ..AugmentationInputs::default()
            },
        );
        assert!(excited.consistency_score < calm.consistency_score);
    }
}
