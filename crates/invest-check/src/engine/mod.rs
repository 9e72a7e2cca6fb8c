//! The decision checkpoint evaluation pipeline: validate, score the seven
//! stages, aggregate, classify, optionally augment, adjust, recommend.

pub mod aggregate;
pub mod adjust;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod recommend;
pub mod router;
pub(crate) mod stages;
pub mod validate;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, classify};
pub use adjust::{adjust_rating, Adjustment};
pub use catalog::{Question, QuestionKind, QUESTIONS};
pub use config::{AdjustmentThresholds, EngineConfig, IntegrationBounds, RatingBands, StageWeights};
pub use domain::{
    AnswerSet, AnswerValue, AugmentationDetails, AugmentationSource, EvaluationResult, Horizon,
    Rating, RiskAppetite, ScoreSignals, Stage, StageScore,
};
pub use router::checkpoint_router;
pub use stages::score_stage;
pub use validate::validate;

use std::collections::BTreeMap;

use tracing::info;

use crate::augment::{AugmentationInputs, Augmentor, IntegrationReport};

/// Error raised by the evaluation entry points. Input problems are the
/// only way an evaluation fails outright; every augmentation degradation
/// is recovered internally.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("required answers missing or invalid: {}", fields.join(", "))]
    IncompleteAnswers { fields: Vec<String> },
}

/// Stateless evaluator applying the rubric configuration to an answer set.
pub struct DecisionEngine {
    config: EngineConfig,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Purely local evaluation. Deterministic and idempotent: the same
    /// answer set always produces an identical result.
    pub fn evaluate_sync(&self, answers: &AnswerSet) -> Result<EvaluationResult, EngineError> {
        let (stage_scores, signals) = self.score_stages(answers)?;
        Ok(self.finish(stage_scores, &signals, IntegrationReport::default()))
    }

    /// Evaluation with optional external augmentation. Without an
    /// augmentor this is exactly [`Self::evaluate_sync`]; with one, the
    /// three analyses run concurrently and their outcomes are folded into
    /// the stage scores within fixed bounds before re-classification.
    pub async fn evaluate(
        &self,
        answers: &AnswerSet,
        augmentor: Option<&Augmentor>,
    ) -> Result<EvaluationResult, EngineError> {
        let (mut stage_scores, signals) = self.score_stages(answers)?;

        let report = match augmentor {
            Some(augmentor) => {
                let inputs = AugmentationInputs::from_answers(answers);
                let outcomes = augmentor.run(&inputs).await;
                crate::augment::integrate(&mut stage_scores, &outcomes, &self.config.integration)
            }
            None => IntegrationReport::default(),
        };

        Ok(self.finish(stage_scores, &signals, report))
    }

    fn score_stages(
        &self,
        answers: &AnswerSet,
    ) -> Result<(BTreeMap<Stage, StageScore>, ScoreSignals), EngineError> {
        let problems = validate(answers);
        if !problems.is_empty() {
            return Err(EngineError::IncompleteAnswers { fields: problems });
        }

        let mut signals = ScoreSignals::default();
        let mut stage_scores = BTreeMap::new();
        for stage in Stage::ALL {
            stage_scores.insert(stage, score_stage(stage, answers, &mut signals));
        }

        Ok((stage_scores, signals))
    }

    fn finish(
        &self,
        stage_scores: BTreeMap<Stage, StageScore>,
        signals: &ScoreSignals,
        report: IntegrationReport,
    ) -> EvaluationResult {
        let total_score = aggregate(&stage_scores, &self.config.stage_weights);
        let base = classify(total_score, &self.config.bands);
        let adjusted = adjust_rating(base, signals, &stage_scores, &self.config);

        let recommendations = recommend::recommend(
            adjusted.rating,
            signals,
            &adjusted.notes,
            &report.suggestions,
            self.config.recommendation_cap,
        );

        let overall_strengths = collect_notes(
            stage_scores.values().map(|score| &score.strengths),
            self.config.notes_cap,
        );
        let overall_weaknesses = collect_notes(
            stage_scores.values().map(|score| &score.weaknesses),
            self.config.notes_cap,
        );

        info!(
            total_score,
            rating = adjusted.rating.label(),
            augmented = report.augmented,
            "checkpoint evaluated"
        );

        EvaluationResult {
            total_score,
            rating: adjusted.rating,
            stage_scores,
            overall_strengths,
            overall_weaknesses,
            recommendations,
            augmented: report.augmented,
        }
    }
}

fn collect_notes<'a>(
    per_stage: impl Iterator<Item = &'a Vec<String>>,
    cap: usize,
) -> Vec<String> {
    let mut notes = Vec::new();
    for stage_notes in per_stage {
        for note in stage_notes {
            if notes.len() == cap {
                return notes;
            }
            if !notes.contains(note) {
                notes.push(note.clone());
            }
        }
    }
    notes
}
