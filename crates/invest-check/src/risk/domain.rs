use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answers to the risk questionnaire, keyed by question id. The value is
/// the selected option label verbatim; scoring parses the point value
/// embedded in the label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskAnswerSet(pub BTreeMap<String, String>);

impl RiskAnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.0.insert(id.into(), label.into());
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.0
            .get(id)
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
    }
}

/// The four weighted assessment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    FinancialCapacity,
    GoalHorizon,
    PsychologicalTolerance,
    Experience,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::FinancialCapacity,
        RiskCategory::GoalHorizon,
        RiskCategory::PsychologicalTolerance,
        RiskCategory::Experience,
    ];

    pub const fn weight(self) -> f32 {
        match self {
            RiskCategory::FinancialCapacity => 0.4,
            RiskCategory::GoalHorizon => 0.3,
            RiskCategory::PsychologicalTolerance => 0.2,
            RiskCategory::Experience => 0.1,
        }
    }
}

/// Role of one risk question: either it contributes to a weighted
/// category average, or it feeds the unweighted demographic modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskQuestionRole {
    Weighted(RiskCategory),
    Demographic,
}

/// Catalog entry for one risk questionnaire question.
#[derive(Debug, Clone, Copy)]
pub struct RiskQuestion {
    pub id: &'static str,
    pub role: RiskQuestionRole,
}

/// The fixed risk questionnaire. Option labels carry their point value in
/// a trailing parenthesis, e.g. "Over five years (90)"; demographic
/// options carry the signed modifier the same way.
pub const RISK_QUESTIONS: &[RiskQuestion] = &[
    RiskQuestion { id: "rp-1", role: RiskQuestionRole::Weighted(RiskCategory::FinancialCapacity) },
    RiskQuestion { id: "rp-2", role: RiskQuestionRole::Weighted(RiskCategory::FinancialCapacity) },
    RiskQuestion { id: "rp-3", role: RiskQuestionRole::Weighted(RiskCategory::GoalHorizon) },
    RiskQuestion { id: "rp-4", role: RiskQuestionRole::Weighted(RiskCategory::GoalHorizon) },
    RiskQuestion { id: "rp-5", role: RiskQuestionRole::Weighted(RiskCategory::PsychologicalTolerance) },
    RiskQuestion { id: "rp-6", role: RiskQuestionRole::Weighted(RiskCategory::PsychologicalTolerance) },
    RiskQuestion { id: "rp-7", role: RiskQuestionRole::Weighted(RiskCategory::Experience) },
    RiskQuestion { id: "rp-8", role: RiskQuestionRole::Weighted(RiskCategory::Experience) },
    RiskQuestion { id: "rp-9", role: RiskQuestionRole::Demographic },
    RiskQuestion { id: "rp-10", role: RiskQuestionRole::Demographic },
];

/// The five risk-profile bands, ordered most defensive first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfileBand {
    Conservative,
    ModerateConservative,
    Balanced,
    Aggressive,
    VeryAggressive,
}

/// Final risk assessment value object, safe to persist or render as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub score: u8,
    pub profile: RiskProfileBand,
    pub name: String,
    pub description: String,
    pub recommendation: String,
    pub needs_verification: bool,
    pub needs_warning: bool,
}
