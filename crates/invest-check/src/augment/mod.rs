//! Resilient external augmentation: three independent analysis requests
//! (logic consistency, risk consistency, cognitive bias) issued
//! concurrently, each with its own timeout and retry budget and a
//! deterministic local fallback. Augmentation can only refine a local
//! score within fixed bounds; it can never fail an evaluation.

mod fallback;
mod integrate;
mod parse;
mod prompt;
mod provider;

pub use integrate::{integrate, IntegrationReport};
pub use provider::{AnalysisProvider, ProviderError};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::domain::{AnswerSet, AugmentationSource, Stage};
use crate::lang::Language;

/// The three augmentation analyses. Each maps to exactly one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AugmentationKind {
    LogicConsistency,
    RiskConsistency,
    CognitiveBias,
}

impl AugmentationKind {
    pub const ALL: [AugmentationKind; 3] = [
        AugmentationKind::LogicConsistency,
        AugmentationKind::RiskConsistency,
        AugmentationKind::CognitiveBias,
    ];

    /// The stage this analysis refines.
    pub const fn stage(self) -> Stage {
        match self {
            AugmentationKind::LogicConsistency => Stage::TradeRules,
            AugmentationKind::RiskConsistency => Stage::RiskControl,
            AugmentationKind::CognitiveBias => Stage::BiasCheck,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AugmentationKind::LogicConsistency => "logic-consistency",
            AugmentationKind::RiskConsistency => "risk-consistency",
            AugmentationKind::CognitiveBias => "cognitive-bias",
        }
    }
}

/// Structured outcome of one analysis, whether served live or locally.
/// Callers cannot tell the source apart from the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationResult {
    pub consistency_score: f32,
    pub conflict_points: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_path: Option<String>,
}

/// The answers an analysis request is composed from, extracted once per
/// evaluation so prompts and fallbacks read the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct AugmentationInputs {
    pub decision_name: Option<String>,
    pub goal: Option<String>,
    pub horizon: Option<String>,
    pub risk_appetite: Option<String>,
    pub entry_rule: Option<String>,
    pub exit_rule: Option<String>,
    pub stop_loss_rule: Option<String>,
    pub position_size: Option<String>,
    pub drawdown_tolerance: Option<String>,
    pub mitigations: Vec<String>,
    pub biases_reviewed: Vec<String>,
    pub contrarian_view: Option<String>,
    pub emotional_state: Option<String>,
}

impl AugmentationInputs {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let text = |id: &str| answers.text(id).map(str::to_string);
        Self {
            decision_name: text("1-1"),
            goal: text("1-2"),
            horizon: text("1-3"),
            risk_appetite: text("1-4"),
            entry_rule: text("3-1"),
            exit_rule: text("3-2"),
            stop_loss_rule: text("3-3"),
            position_size: text("4-1"),
            drawdown_tolerance: text("4-2"),
            mitigations: answers
                .choices("4-3")
                .into_iter()
                .map(str::to_string)
                .collect(),
            biases_reviewed: answers
                .choices("6-1")
                .into_iter()
                .map(str::to_string)
                .collect(),
            contrarian_view: text("6-2"),
            emotional_state: text("6-3"),
        }
    }
}

/// Timeout, retry, and backoff budget for one analysis kind. Modelled as
/// an explicit policy so the retry-then-fallback behavior is testable
/// without a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempt_timeout: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(15),
            max_retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Result of one kind, tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct KindOutcome {
    pub kind: AugmentationKind,
    pub result: AugmentationResult,
    pub source: AugmentationSource,
}

/// Runs the three analyses against a provider, falling back locally when
/// a kind exhausts its budget. One kind's failure never blocks the others.
pub struct Augmentor {
    provider: Arc<dyn AnalysisProvider>,
    policy: RetryPolicy,
    language: Language,
}

impl Augmentor {
    pub fn new(provider: Arc<dyn AnalysisProvider>, language: Language) -> Self {
        Self::with_policy(provider, language, RetryPolicy::default())
    }

    pub fn with_policy(
        provider: Arc<dyn AnalysisProvider>,
        language: Language,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            policy,
            language,
        }
    }

    /// All three kinds, concurrently. Always returns three well-formed
    /// outcomes; this function cannot fail.
    pub async fn run(&self, inputs: &AugmentationInputs) -> Vec<KindOutcome> {
        let (logic, risk, bias) = tokio::join!(
            self.run_kind(AugmentationKind::LogicConsistency, inputs),
            self.run_kind(AugmentationKind::RiskConsistency, inputs),
            self.run_kind(AugmentationKind::CognitiveBias, inputs),
        );
        vec![logic, risk, bias]
    }

    async fn run_kind(&self, kind: AugmentationKind, inputs: &AugmentationInputs) -> KindOutcome {
        let request = prompt::build_prompt(kind, inputs, self.language);
        let attempts = self.policy.max_retries + 1;

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.backoff).await;
            }

            let outcome = tokio::time::timeout(
                self.policy.attempt_timeout,
                self.provider.request(kind, &request),
            )
            .await;

            match outcome {
                Ok(Ok(raw)) => match parse::parse_payload(&raw) {
                    Ok(result) => {
                        debug!(kind = kind.label(), attempt, "analysis served");
                        return KindOutcome {
                            kind,
                            result,
                            source: AugmentationSource::Service,
                        };
                    }
                    Err(err) => {
                        warn!(kind = kind.label(), attempt, %err, "malformed analysis payload");
                    }
                },
                Ok(Err(err)) => {
                    warn!(kind = kind.label(), attempt, %err, "analysis request failed");
                }
                Err(_) => {
                    warn!(kind = kind.label(), attempt, "analysis request timed out");
                }
            }
        }

        debug!(kind = kind.label(), "retry budget exhausted, using local fallback");
        KindOutcome {
            kind,
            result: fallback::local_fallback(kind, inputs),
            source: AugmentationSource::Fallback,
        }
    }
}
