use super::domain::{AdviceTag, Horizon, Rating, ScoreSignals};

/// Builds the final advice list: one rating-tier baseline, the
/// explanations produced by the adjustment layer, weakness-triggered
/// entries from a fixed tag lookup, horizon/liquidity context, and any
/// augmentation suggestions. Deduplicated on exact string equality,
/// first-seen order preserved, capped.
pub fn recommend(
    rating: Rating,
    signals: &ScoreSignals,
    adjustment_notes: &[String],
    suggestions: &[String],
    cap: usize,
) -> Vec<String> {
    let mut advice = Vec::new();

    advice.push(baseline(rating).to_string());
    advice.extend(adjustment_notes.iter().cloned());

    for tag in &signals.tags {
        advice.push(tag_advice(*tag).to_string());
    }

    match signals.horizon {
        Some(Horizon::Short) => {
            if signals.liquidity_score.map(|score| score < 50).unwrap_or(false) {
                advice.push(
                    "Keep at least three months of expenses liquid before committing new capital."
                        .to_string(),
                );
            }
        }
        Some(Horizon::Long) => {
            advice.push("Schedule an annual rebalance so the position tracks the plan.".to_string());
        }
        _ => {}
    }

    advice.extend(suggestions.iter().cloned());

    dedup_capped(advice, cap)
}

fn baseline(rating: Rating) -> &'static str {
    match rating {
        Rating::System => {
            "The decision is systematic; execute it as written and review on schedule."
        }
        Rating::Stable => {
            "The decision is broadly sound; tighten the flagged gaps before executing."
        }
        Rating::Cautious => {
            "Proceed cautiously: reduce intended size until the flagged gaps are closed."
        }
        Rating::HighRisk => {
            "Do not execute yet: rework the plan until the core rules are in place."
        }
    }
}

fn tag_advice(tag: AdviceTag) -> &'static str {
    match tag {
        AdviceTag::VagueGoal => "Restate the goal with a target, a horizon, and a loss limit.",
        AdviceTag::UnrealisticYield => {
            "Revisit the return target against historical asset-class returns."
        }
        AdviceTag::SingleMethod => {
            "Corroborate the thesis with a second, independent analysis method."
        }
        AdviceTag::UnquantifiedRules => {
            "Attach numeric triggers to every entry, exit, and sizing rule."
        }
        AdviceTag::MissingStopLoss => "Define a hard stop-loss before entering the position.",
        AdviceTag::ThinRiskMitigation => {
            "Layer at least two independent risk mitigations, e.g. diversification plus a stop."
        }
        AdviceTag::NoCrossVerification => {
            "Cross-verify the key facts against a source with no stake in the outcome."
        }
        AdviceTag::BiasUnchecked => {
            "Walk the decision through a cognitive-bias checklist before committing."
        }
        AdviceTag::NoContrarianView => {
            "Write down the strongest case against the trade and answer it."
        }
        AdviceTag::EmotionalState => {
            "Sleep on the decision; re-run the checkpoint in a calm state."
        }
        AdviceTag::NoReviewDate => "Put a review date in the calendar before executing.",
    }
}

fn dedup_capped(entries: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = Vec::with_capacity(cap);
    for entry in entries {
        if seen.len() == cap {
            break;
        }
        if !seen.contains(&entry) {
            seen.push(entry);
        }
    }
    seen
}
