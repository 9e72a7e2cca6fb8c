//! Risk-profile questionnaire scorer: weighted category averages, a
//! demographic modifier, and cross-validation overrides, independent of
//! any specific decision checkpoint.

pub mod domain;

pub use domain::{
    RiskAnswerSet, RiskAssessmentResult, RiskCategory, RiskProfileBand, RiskQuestion,
    RiskQuestionRole, RISK_QUESTIONS,
};

use crate::lang::Language;
use domain::RiskQuestionRole::{Demographic, Weighted};

/// Thresholds for the risk scorer. Hand-tuned product values kept as
/// configuration rather than re-derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    pub bands: RiskBands,
    /// Goal-question points at or above this count as an aggressive goal.
    pub aggressive_goal_floor: f32,
    /// Category averages under this count as low capacity/experience.
    pub low_category_ceiling: f32,
    /// Upper bound of the balanced band; the aggressive-goal override
    /// caps the score here.
    pub balanced_cap: f32,
    pub verification_penalty: f32,
    pub warning_penalty: f32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            bands: RiskBands::default(),
            aggressive_goal_floor: 75.0,
            low_category_ceiling: 40.0,
            balanced_cap: 65.0,
            verification_penalty: 5.0,
            warning_penalty: 8.0,
        }
    }
}

/// Inclusive lower bounds of the upper four profile bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskBands {
    pub moderate_floor: u8,
    pub balanced_floor: u8,
    pub aggressive_floor: u8,
    pub very_aggressive_floor: u8,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            moderate_floor: 36,
            balanced_floor: 51,
            aggressive_floor: 66,
            very_aggressive_floor: 81,
        }
    }
}

impl RiskBands {
    pub fn classify(&self, score: f32) -> RiskProfileBand {
        let rounded = score.round().clamp(0.0, 100.0) as u8;
        if rounded >= self.very_aggressive_floor {
            RiskProfileBand::VeryAggressive
        } else if rounded >= self.aggressive_floor {
            RiskProfileBand::Aggressive
        } else if rounded >= self.balanced_floor {
            RiskProfileBand::Balanced
        } else if rounded >= self.moderate_floor {
            RiskProfileBand::ModerateConservative
        } else {
            RiskProfileBand::Conservative
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RiskProfileError {
    #[error("no scoreable risk answers: {}", fields.join(", "))]
    IncompleteAnswers { fields: Vec<String> },
}

/// Scores the risk questionnaire with the default configuration.
pub fn score_risk_profile(
    answers: &RiskAnswerSet,
    language: Language,
) -> Result<RiskAssessmentResult, RiskProfileError> {
    score_risk_profile_with(answers, language, &RiskConfig::default())
}

/// Weighted category averages (re-normalised over the categories that
/// were answered), plus the unweighted demographic modifier, then the
/// three cross-validation overrides in fixed order. The band lookup runs
/// again after all penalties so the profile matches the final score.
pub fn score_risk_profile_with(
    answers: &RiskAnswerSet,
    language: Language,
    config: &RiskConfig,
) -> Result<RiskAssessmentResult, RiskProfileError> {
    let mut weighted_sum = 0.0f32;
    let mut weight_sum = 0.0f32;
    for category in RiskCategory::ALL {
        if let Some(average) = category_average(answers, category) {
            weighted_sum += average * category.weight();
            weight_sum += category.weight();
        }
    }

    if weight_sum <= 0.0 {
        let fields = RISK_QUESTIONS
            .iter()
            .filter(|question| matches!(question.role, Weighted(_)))
            .map(|question| question.id.to_string())
            .collect();
        return Err(RiskProfileError::IncompleteAnswers { fields });
    }

    let mut score = weighted_sum / weight_sum;
    score += demographic_modifier(answers);
    score = score.clamp(0.0, 100.0);

    let mut needs_verification = false;
    let mut needs_warning = false;

    // Override 1: an aggressive goal without the finances to carry it is
    // capped at the top of the balanced band.
    let aggressive_goal = answers
        .label("rp-3")
        .and_then(extract_points)
        .map(|points| points >= config.aggressive_goal_floor)
        .unwrap_or(false);
    let low_capacity = category_average(answers, RiskCategory::FinancialCapacity)
        .map(|average| average < config.low_category_ceiling)
        .unwrap_or(false);
    if aggressive_goal && low_capacity {
        score = score.min(config.balanced_cap);
    }

    // Override 2: a buy-the-dip reflex without the experience to back it
    // needs a human check.
    let buys_the_dip = answers
        .label("rp-6")
        .map(is_buy_the_dip)
        .unwrap_or(false);
    let low_experience = category_average(answers, RiskCategory::Experience)
        .map(|average| average < config.low_category_ceiling)
        .unwrap_or(false);
    if buys_the_dip && low_experience {
        needs_verification = true;
        score -= config.verification_penalty;
    }

    // Override 3: senior investors classified aggressive-or-higher get a
    // suitability warning.
    let senior = answers.label("rp-9").map(is_senior).unwrap_or(false);
    if senior && config.bands.classify(score) >= RiskProfileBand::Aggressive {
        needs_warning = true;
        score -= config.warning_penalty;
    }

    let score = score.clamp(0.0, 100.0);
    let profile = config.bands.classify(score);
    let (name, description, recommendation) = profile_texts(profile, language);

    Ok(RiskAssessmentResult {
        score: score.round() as u8,
        profile,
        name: name.to_string(),
        description: description.to_string(),
        recommendation: recommendation.to_string(),
        needs_verification,
        needs_warning,
    })
}

fn category_average(answers: &RiskAnswerSet, category: RiskCategory) -> Option<f32> {
    let mut sum = 0.0f32;
    let mut count = 0u32;
    for question in RISK_QUESTIONS {
        if question.role != Weighted(category) {
            continue;
        }
        if let Some(points) = answers.label(question.id).and_then(extract_points) {
            sum += points;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f32)
}

fn demographic_modifier(answers: &RiskAnswerSet) -> f32 {
    RISK_QUESTIONS
        .iter()
        .filter(|question| question.role == Demographic)
        .filter_map(|question| answers.label(question.id).and_then(extract_points))
        .sum()
}

/// Point value embedded in an option label, e.g. "Over five years (90)"
/// or "Over 50 (-5)". The last parenthesised number wins.
pub(crate) fn extract_points(label: &str) -> Option<f32> {
    let open = label.rfind('(')?;
    let rest = &label[open + 1..];
    let close = rest.find(')')?;
    rest[..close].trim().parse::<f32>().ok()
}

fn is_buy_the_dip(label: &str) -> bool {
    let value = label.to_lowercase();
    value.contains("add more") || value.contains("lower cost") || value.contains("补仓")
}

fn is_senior(label: &str) -> bool {
    let value = label.to_lowercase();
    value.contains("over 50") || value.contains(">50") || value.contains("50+") || value.contains("50岁以上")
}

fn profile_texts(
    profile: RiskProfileBand,
    language: Language,
) -> (&'static str, &'static str, &'static str) {
    match (profile, language) {
        (RiskProfileBand::Conservative, Language::En) => (
            "Conservative",
            "Capital preservation comes first; drawdowns are hard to tolerate.",
            "Favour deposits, money-market funds, and short-duration bonds.",
        ),
        (RiskProfileBand::ModerateConservative, Language::En) => (
            "Moderately conservative",
            "Modest growth is welcome as long as losses stay small and rare.",
            "Blend bond funds with a small allocation to broad equity indices.",
        ),
        (RiskProfileBand::Balanced, Language::En) => (
            "Balanced",
            "Comfortable trading moderate swings for long-run growth.",
            "Hold a diversified stock/bond mix and rebalance on a schedule.",
        ),
        (RiskProfileBand::Aggressive, Language::En) => (
            "Aggressive",
            "Growth-oriented and able to sit through meaningful drawdowns.",
            "Tilt toward equities but keep position limits and a cash buffer.",
        ),
        (RiskProfileBand::VeryAggressive, Language::En) => (
            "Very aggressive",
            "Seeks maximum growth and accepts deep, extended drawdowns.",
            "Concentrated growth assets are acceptable; size positions deliberately.",
        ),
        (RiskProfileBand::Conservative, Language::Zh) => (
            "保守型",
            "以保住本金为先，难以承受回撤。",
            "建议以存款、货币基金和短债为主。",
        ),
        (RiskProfileBand::ModerateConservative, Language::Zh) => (
            "稳健偏保守型",
            "希望稳步增值，但亏损须小而少。",
            "建议以债券基金为主，搭配少量宽基指数。",
        ),
        (RiskProfileBand::Balanced, Language::Zh) => (
            "平衡型",
            "愿意承受适度波动以换取长期增长。",
            "建议股债均衡配置并定期再平衡。",
        ),
        (RiskProfileBand::Aggressive, Language::Zh) => (
            "进取型",
            "以增长为目标，能够承受较大回撤。",
            "建议偏向权益资产，但保留仓位上限与现金缓冲。",
        ),
        (RiskProfileBand::VeryAggressive, Language::Zh) => (
            "激进型",
            "追求最大化增长，接受深度且较长的回撤。",
            "可以集中配置成长资产，但须有意识地控制单笔仓位。",
        ),
    }
}
