//! Integration specifications for the decision checkpoint workflow.
//!
//! Scenarios run end to end through the public engine facade and the HTTP
//! router so scoring, classification, adjustment, and advice are validated
//! without reaching into private modules.

mod common {
    use chrono::NaiveDate;

    use invest_check::engine::domain::{AnswerSet, AnswerValue};

    pub(super) fn text(answers: &mut AnswerSet, id: &str, value: &str) {
        answers.insert(id, AnswerValue::Text(value.to_string()));
    }

    pub(super) fn choices(answers: &mut AnswerSet, id: &str, values: &[&str]) {
        answers.insert(
            id,
            AnswerValue::Choices(values.iter().map(|value| value.to_string()).collect()),
        );
    }

    pub(super) fn strong_answers() -> AnswerSet {
        let mut answers = AnswerSet::new();
        text(&mut answers, "1-1", "Increase position in Acme Industrial");
        text(
            &mut answers,
            "1-2",
            "Grow the education fund by a steady margin over the next decade",
        );
        text(&mut answers, "1-3", "Long term (5+ years)");
        text(&mut answers, "1-4", "Balanced");
        text(&mut answers, "1-5", "Target 12% a year");
        text(&mut answers, "1-6", "Accept at most a 10% loss");
        choices(
            &mut answers,
            "2-1",
            &["Fundamental analysis", "Technical analysis"],
        );
        text(
            &mut answers,
            "2-2",
            "Earnings growth is backed by historical data and a backtest of the entry signal over ten years.",
        );
        text(&mut answers, "2-3", "Quarterly earnings reports");
        text(&mut answers, "3-1", "Buy after a 10% pullback from the recent high");
        text(&mut answers, "3-2", "Take profit at 25%");
        text(&mut answers, "3-3", "Stop out at 8% below cost");
        text(&mut answers, "4-1", "No more than 15% of the portfolio");
        text(&mut answers, "4-2", "Up to 20% drawdown");
        choices(
            &mut answers,
            "4-3",
            &["Diversification", "Hard stop-loss", "Position limit"],
        );
        text(&mut answers, "4-4", "3-6 months of expenses");
        choices(
            &mut answers,
            "5-1",
            &["Company filings", "Independent research"],
        );
        text(&mut answers, "5-2", "Yes");
        text(
            &mut answers,
            "5-3",
            "Checked the filing numbers against the exchange record.",
        );
        choices(
            &mut answers,
            "6-1",
            &["Confirmation bias", "Anchoring", "Recency bias"],
        );
        text(&mut answers, "6-2", "Yes");
        text(&mut answers, "6-3", "Calm");
        text(&mut answers, "7-1", "Yes");
        answers.insert(
            "7-2",
            AnswerValue::Date(NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date")),
        );
        text(&mut answers, "7-3", "Journal entry drafted");
        answers
    }
}

use common::*;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use invest_check::engine::domain::AnswerSet;
use invest_check::engine::router::{checkpoint_router, CheckpointState};
use invest_check::engine::EngineError;
use invest_check::{DecisionEngine, Rating, Stage};

#[test]
fn thorough_checkpoint_earns_a_system_rating() {
    let engine = DecisionEngine::with_defaults();
    let result = engine
        .evaluate_sync(&strong_answers())
        .expect("evaluation succeeds");

    assert_eq!(result.total_score, 89);
    assert_eq!(result.rating, Rating::System);
    assert_eq!(result.stage_scores.len(), Stage::ALL.len());
    assert!(result.overall_weaknesses.is_empty());
    assert!(result
        .recommendations
        .iter()
        .any(|advice| advice.contains("execute it as written")));
}

#[test]
fn blank_checkpoint_is_rejected_with_the_offending_fields() {
    let engine = DecisionEngine::with_defaults();
    let EngineError::IncompleteAnswers { fields } = engine
        .evaluate_sync(&AnswerSet::new())
        .expect_err("validation fails");

    assert!(!fields.is_empty());
    assert!(fields.iter().any(|field| field.contains("3-3")));
}

#[test]
fn same_answers_always_produce_the_same_record() {
    let engine = DecisionEngine::with_defaults();
    let answers = strong_answers();

    let first = serde_json::to_string(&engine.evaluate_sync(&answers).expect("run"))
        .expect("serialize");
    let second = serde_json::to_string(&engine.evaluate_sync(&answers).expect("run"))
        .expect("serialize");
    assert_eq!(first, second);
}

#[tokio::test]
async fn http_round_trip_serves_the_evaluation() {
    let state = CheckpointState::new(Arc::new(DecisionEngine::with_defaults()), None);
    let router = checkpoint_router(state);

    let request = axum::http::Request::post("/api/v1/checkpoints/evaluate")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&json!({ "answers": strong_answers() })).expect("encode"),
        ))
        .expect("build request");

    let response = router.oneshot(request).await.expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload.get("rating"), Some(&json!("system")));
    assert_eq!(payload.get("augmented"), Some(&json!(false)));
}
