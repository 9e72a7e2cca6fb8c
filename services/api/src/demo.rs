use chrono::NaiveDate;
use clap::Args;

use invest_check::engine::domain::{AnswerSet, AnswerValue};
use invest_check::error::AppError;
use invest_check::risk::{score_risk_profile, RiskAnswerSet};
use invest_check::{DecisionEngine, Language};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Language for localized output (e.g. "en" or "zh")
    #[arg(long)]
    pub(crate) language: Option<String>,
    /// Skip the risk-profile portion of the demo
    #[arg(long)]
    pub(crate) skip_risk_profile: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let language = args
        .language
        .as_deref()
        .map(Language::from_tag)
        .unwrap_or_default();

    println!("Decision checkpoint demo");
    let engine = DecisionEngine::with_defaults();
    let result = engine.evaluate_sync(&sample_checkpoint())?;

    println!(
        "- Total score {} -> rating {}",
        result.total_score,
        result.rating.label()
    );
    for (stage, score) in &result.stage_scores {
        println!("  - {}: {}", stage.label(), score.score);
    }
    println!("  Recommendations:");
    for advice in &result.recommendations {
        println!("    - {advice}");
    }
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("  Full result payload:\n{json}"),
        Err(err) => println!("  Full result payload unavailable: {err}"),
    }

    if args.skip_risk_profile {
        return Ok(());
    }

    println!("\nRisk profile demo");
    let profile = score_risk_profile(&sample_risk_questionnaire(), language)?;
    println!(
        "- Score {} -> {} ({})",
        profile.score, profile.name, profile.description
    );
    println!("  Recommendation: {}", profile.recommendation);
    if profile.needs_verification {
        println!("  Flag: answers need human verification");
    }
    if profile.needs_warning {
        println!("  Flag: suitability warning issued");
    }

    Ok(())
}

fn sample_checkpoint() -> AnswerSet {
    let mut answers = AnswerSet::new();
    let mut text = |id: &str, value: &str| {
        answers.insert(id, AnswerValue::Text(value.to_string()));
    };
    text("1-1", "Increase position in Acme Industrial");
    text(
        "1-2",
        "Grow the education fund by a steady margin over the next decade",
    );
    text("1-3", "Long term (5+ years)");
    text("1-4", "Balanced");
    text("1-5", "Target 12% a year");
    text("1-6", "Accept at most a 10% loss");
    text(
        "2-2",
        "Earnings growth is backed by historical data and a backtest of the entry signal.",
    );
    text("2-3", "Quarterly earnings reports");
    text("3-1", "Buy after a 10% pullback from the recent high");
    text("3-2", "Take profit at 25%");
    text("3-3", "Stop out at 8% below cost");
    text("4-1", "No more than 15% of the portfolio");
    text("4-2", "Up to 20% drawdown");
    text("4-4", "3-6 months of expenses");
    text("5-2", "Yes");
    text("5-3", "Checked the filing numbers against the exchange record.");
    text("6-2", "Yes");
    text("6-3", "Calm");
    text("7-1", "Yes");
    text("7-3", "Journal entry drafted");

    let mut choices = |id: &str, values: &[&str]| {
        answers.insert(
            id,
            AnswerValue::Choices(values.iter().map(|value| value.to_string()).collect()),
        );
    };
    choices("2-1", &["Fundamental analysis", "Technical analysis"]);
    choices("4-3", &["Diversification", "Hard stop-loss", "Position limit"]);
    choices("5-1", &["Company filings", "Independent research"]);
    choices("6-1", &["Confirmation bias", "Anchoring"]);

    if let Some(date) = NaiveDate::from_ymd_opt(2026, 3, 1) {
        answers.insert("7-2", AnswerValue::Date(date));
    }

    answers
}

fn sample_risk_questionnaire() -> RiskAnswerSet {
    let mut answers = RiskAnswerSet::new();
    answers.insert("rp-1", "I save 10-30% of my income (60)");
    answers.insert("rp-2", "Investable assets are under half my net worth (50)");
    answers.insert("rp-3", "Steady growth above inflation (55)");
    answers.insert("rp-4", "Three to five years (60)");
    answers.insert("rp-5", "I would hold through a 20% drawdown (60)");
    answers.insert("rp-6", "I would hold and review the thesis (50)");
    answers.insert("rp-7", "3-10 years of investing (60)");
    answers.insert("rp-8", "Stocks and funds (55)");
    answers.insert("rp-9", "30 to 50 (0)");
    answers.insert("rp-10", "Stable salaried income (5)");
    answers
}
