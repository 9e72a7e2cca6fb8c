use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One answer as supplied by the collector layer. Question text and
/// rendering are out of scope; the engine only sees the structured value.
///
/// Untagged deserialization maps every JSON string to `Text`, so a free
/// text answer that happens to look like a date keeps its raw form.
/// Date-kinded questions read the date back out through
/// [`AnswerSet::date`], which accepts both the typed variant and ISO text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
    Date(NaiveDate),
}

impl AnswerValue {
    /// An answer counts as blank when it carries no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Date(_) => false,
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Choices(choices) => {
                choices.iter().all(|choice| choice.trim().is_empty())
            }
        }
    }
}

/// Immutable snapshot of all answers for one evaluation, keyed by the
/// stable question id (e.g. `"3-1"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(pub BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.0.insert(id.into(), value);
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    /// Trimmed text of an answer, if present and non-blank.
    pub fn text(&self, id: &str) -> Option<&str> {
        match self.0.get(id) {
            Some(AnswerValue::Text(text)) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Selected options of a multi-choice answer, blanks filtered out.
    pub fn choices(&self, id: &str) -> Vec<&str> {
        match self.0.get(id) {
            Some(AnswerValue::Choices(choices)) => choices
                .iter()
                .map(|choice| choice.trim())
                .filter(|choice| !choice.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Date of an answer, whether it arrived as the typed variant or as
    /// `YYYY-MM-DD` text from the wire.
    pub fn date(&self, id: &str) -> Option<NaiveDate> {
        match self.0.get(id) {
            Some(AnswerValue::Date(date)) => Some(*date),
            Some(AnswerValue::Text(text)) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn answered(&self, id: &str) -> bool {
        self.0.get(id).map(|value| !value.is_blank()).unwrap_or(false)
    }
}

/// The seven thematic stages of a decision checkpoint. Question ids are
/// prefixed with the stage number (`"4-2"` belongs to [`Stage::RiskControl`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Goals,
    Method,
    TradeRules,
    RiskControl,
    Verification,
    BiasCheck,
    Documentation,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Goals,
        Stage::Method,
        Stage::TradeRules,
        Stage::RiskControl,
        Stage::Verification,
        Stage::BiasCheck,
        Stage::Documentation,
    ];

    pub const fn number(self) -> u8 {
        match self {
            Stage::Goals => 1,
            Stage::Method => 2,
            Stage::TradeRules => 3,
            Stage::RiskControl => 4,
            Stage::Verification => 5,
            Stage::BiasCheck => 6,
            Stage::Documentation => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Stage::Goals => "goals & risk appetite",
            Stage::Method => "analysis method",
            Stage::TradeRules => "buy/sell rules",
            Stage::RiskControl => "risk management",
            Stage::Verification => "information validation",
            Stage::BiasCheck => "cognitive bias review",
            Stage::Documentation => "documentation & review",
        }
    }
}

/// Overall decision quality, ordered worst to best so band shifts are
/// plain ordinal steps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    HighRisk,
    Cautious,
    Stable,
    System,
}

impl Rating {
    pub const fn label(self) -> &'static str {
        match self {
            Rating::HighRisk => "high-risk",
            Rating::Cautious => "cautious",
            Rating::Stable => "stable",
            Rating::System => "system",
        }
    }

    /// The next band up; saturates at [`Rating::System`].
    pub const fn upgraded(self) -> Self {
        match self {
            Rating::HighRisk => Rating::Cautious,
            Rating::Cautious => Rating::Stable,
            Rating::Stable | Rating::System => Rating::System,
        }
    }

    /// The next band down; saturates at [`Rating::HighRisk`].
    pub const fn downgraded(self) -> Self {
        match self {
            Rating::System => Rating::Stable,
            Rating::Stable => Rating::Cautious,
            Rating::Cautious | Rating::HighRisk => Rating::HighRisk,
        }
    }
}

/// Where an augmentation result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AugmentationSource {
    Service,
    Fallback,
}

/// Augmentation outcome recorded on the stage it adjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationDetails {
    pub source: AugmentationSource,
    pub consistency_score: f32,
    pub adjustment: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Score and findings for a single stage. The score is always within
/// [0,100]; strengths and weaknesses are ordered by rule firing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageScore {
    pub score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub augmentation: Option<AugmentationDetails>,
}

impl StageScore {
    pub(crate) fn new(score: u8) -> Self {
        Self {
            score,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            augmentation: None,
        }
    }
}

/// Final evaluation value object. Created fresh per evaluation and safe to
/// serialize directly as the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total_score: u8,
    pub rating: Rating,
    pub stage_scores: BTreeMap<Stage, StageScore>,
    pub overall_strengths: Vec<String>,
    pub overall_weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub augmented: bool,
}

/// Investment horizon derived from the goals stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_ascii_lowercase();
        if value.starts_with("short") || value.contains("短") {
            Some(Self::Short)
        } else if value.starts_with("medium") || value.starts_with("mid") || value.contains("中") {
            Some(Self::Medium)
        } else if value.starts_with("long") || value.contains("长") {
            Some(Self::Long)
        } else {
            None
        }
    }
}

/// Stated risk appetite from the goals stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskAppetite {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskAppetite {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_ascii_lowercase();
        if value.starts_with("conservative") || value.contains("保守") {
            Some(Self::Conservative)
        } else if value.starts_with("balanced") || value.starts_with("moderate") || value.contains("稳健") {
            Some(Self::Balanced)
        } else if value.starts_with("aggressive") || value.contains("激进") {
            Some(Self::Aggressive)
        } else {
            None
        }
    }
}

/// Advice keys recorded by stage scorers; the recommendation generator
/// resolves them through a fixed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceTag {
    VagueGoal,
    UnrealisticYield,
    SingleMethod,
    UnquantifiedRules,
    MissingStopLoss,
    ThinRiskMitigation,
    NoCrossVerification,
    BiasUnchecked,
    NoContrarianView,
    EmotionalState,
    NoReviewDate,
}

/// Cross-stage signals collected while scoring, consumed by the dynamic
/// adjustment layer and the recommendation generator. Mirrors the rubric
/// engine pattern of separating display strings from typed signals.
#[derive(Debug, Clone, Default)]
pub struct ScoreSignals {
    pub horizon: Option<Horizon>,
    pub risk_appetite: Option<RiskAppetite>,
    pub yield_target_pct: Option<f32>,
    pub liquidity_score: Option<u8>,
    pub quantified_rules: u8,
    pub tags: Vec<AdviceTag>,
}

impl ScoreSignals {
    pub(crate) fn tag(&mut self, tag: AdviceTag) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}
