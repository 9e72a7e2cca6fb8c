use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::augment::{AnalysisProvider, AugmentationKind, ProviderError};
use crate::engine::domain::{AnswerSet, AnswerValue};
use crate::engine::router::{checkpoint_router, CheckpointState};
use crate::engine::DecisionEngine;

pub(super) fn put_text(answers: &mut AnswerSet, id: &str, text: &str) {
    answers.insert(id, AnswerValue::Text(text.to_string()));
}

pub(super) fn put_choices(answers: &mut AnswerSet, id: &str, choices: &[&str]) {
    answers.insert(
        id,
        AnswerValue::Choices(choices.iter().map(|choice| choice.to_string()).collect()),
    );
}

pub(super) fn put_date(answers: &mut AnswerSet, id: &str, year: i32, month: u32, day: u32) {
    let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
    answers.insert(id, AnswerValue::Date(date));
}

/// A thoroughly worked decision: every stage answered well, no weaknesses
/// anywhere, quantified rules throughout.
pub(super) fn strong_answers() -> AnswerSet {
    let mut answers = AnswerSet::new();
    put_text(&mut answers, "1-1", "Increase position in Acme Industrial");
    put_text(
        &mut answers,
        "1-2",
        "Grow the education fund by a steady margin over the next decade",
    );
    put_text(&mut answers, "1-3", "Long term (5+ years)");
    put_text(&mut answers, "1-4", "Balanced");
    put_text(&mut answers, "1-5", "Target 12% a year");
    put_text(&mut answers, "1-6", "Accept at most a 10% loss");
    put_choices(
        &mut answers,
        "2-1",
        &["Fundamental analysis", "Technical analysis"],
    );
    put_text(
        &mut answers,
        "2-2",
        "Earnings growth is backed by historical data and a backtest of the entry signal over ten years.",
    );
    put_text(&mut answers, "2-3", "Quarterly earnings reports");
    put_text(&mut answers, "3-1", "Buy after a 10% pullback from the recent high");
    put_text(&mut answers, "3-2", "Take profit at 25%");
    put_text(&mut answers, "3-3", "Stop out at 8% below cost");
    put_text(&mut answers, "4-1", "No more than 15% of the portfolio");
    put_text(&mut answers, "4-2", "Up to 20% drawdown");
    put_choices(
        &mut answers,
        "4-3",
        &["Diversification", "Hard stop-loss", "Position limit"],
    );
    put_text(&mut answers, "4-4", "3-6 months of expenses");
    put_choices(
        &mut answers,
        "5-1",
        &["Company filings", "Independent research"],
    );
    put_text(&mut answers, "5-2", "Yes");
    put_text(
        &mut answers,
        "5-3",
        "Checked the filing numbers against the exchange record.",
    );
    put_choices(
        &mut answers,
        "6-1",
        &["Confirmation bias", "Anchoring", "Recency bias"],
    );
    put_text(&mut answers, "6-2", "Yes");
    put_text(&mut answers, "6-3", "Calm");
    put_text(&mut answers, "7-1", "Yes");
    put_date(&mut answers, "7-2", 2026, 3, 1);
    put_text(&mut answers, "7-3", "Journal entry drafted");
    answers
}

/// Required answers present but everything about the plan is weak: vague
/// goal, subjective rules, unrealistic target, no written record.
pub(super) fn weak_answers() -> AnswerSet {
    let mut answers = AnswerSet::new();
    put_text(&mut answers, "1-1", "Buy meme coin");
    put_text(&mut answers, "1-2", "Get rich");
    put_text(&mut answers, "1-3", "Short term");
    put_text(&mut answers, "1-4", "Aggressive");
    put_text(&mut answers, "1-5", "Target 50% a year");
    put_choices(&mut answers, "2-1", &["Gut feel"]);
    put_text(&mut answers, "3-1", "I feel it will go up");
    put_text(&mut answers, "3-2", "Sell when it feels toppy");
    put_text(&mut answers, "3-3", "No stop");
    put_text(&mut answers, "4-1", "As much as possible");
    put_choices(&mut answers, "4-3", &["Stop-loss"]);
    put_text(&mut answers, "4-4", "None");
    put_choices(&mut answers, "5-1", &["Forum tip"]);
    answers
}

pub(super) fn checkpoint_router_with_provider(
    provider: Option<Arc<dyn AnalysisProvider>>,
) -> axum::Router {
    let engine = Arc::new(DecisionEngine::with_defaults());
    checkpoint_router(CheckpointState::new(engine, provider))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Provider returning the same well-formed payload for every kind.
pub(super) struct ScriptedProvider {
    pub(super) payload: String,
}

impl ScriptedProvider {
    pub(super) fn confident() -> Self {
        Self {
            payload: serde_json::json!({
                "consistency_score": 9.0,
                "conflict_points": [],
                "suggestions": ["Keep the written rules next to the order ticket."],
                "reasoning_path": "rules are mutually consistent",
            })
            .to_string(),
        }
    }
}

#[async_trait]
impl AnalysisProvider for ScriptedProvider {
    async fn request(
        &self,
        _kind: AugmentationKind,
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        Ok(self.payload.clone())
    }
}

/// Provider that always fails, forcing the local fallback path.
pub(super) struct FailingProvider {
    pub(super) calls: AtomicU32,
}

impl FailingProvider {
    pub(super) fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl AnalysisProvider for FailingProvider {
    async fn request(
        &self,
        _kind: AugmentationKind,
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Unavailable)
    }
}
