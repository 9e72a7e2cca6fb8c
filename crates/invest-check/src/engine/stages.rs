use super::catalog::stage_questions;
use super::domain::{
    AdviceTag, AnswerSet, Horizon, RiskAppetite, ScoreSignals, Stage, StageScore,
};

/// Scores one stage from the full answer set. Pure: the same answers
/// always produce the same score. Reads only the question ids belonging
/// to the stage and clamps the result to [0,100] before returning.
pub fn score_stage(stage: Stage, answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    match stage {
        Stage::Goals => score_goals(answers, signals),
        Stage::Method => score_method(answers, signals),
        Stage::TradeRules => score_trade_rules(answers, signals),
        Stage::RiskControl => score_risk_control(answers, signals),
        Stage::Verification => score_verification(answers, signals),
        Stage::BiasCheck => score_bias_check(answers, signals),
        Stage::Documentation => score_documentation(answers, signals),
    }
}

struct StageSheet {
    total: i32,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
}

impl StageSheet {
    fn new(base: i32) -> Self {
        Self {
            total: base,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        }
    }

    fn strength(&mut self, delta: i32, note: impl Into<String>) {
        self.total += delta;
        self.strengths.push(note.into());
    }

    fn weakness(&mut self, delta: i32, note: impl Into<String>) {
        self.total -= delta;
        self.weaknesses.push(note.into());
    }

    fn add(&mut self, delta: i32) {
        self.total += delta;
    }

    /// Penalise every required question of the stage that was left blank.
    /// Required answers are never scored neutrally when absent.
    fn penalize_missing(&mut self, stage: Stage, answers: &AnswerSet) {
        for question in stage_questions(stage).filter(|question| question.required) {
            if !answers.answered(question.id) {
                self.weakness(10, format!("required answer {} is missing", question.id));
            }
        }
    }

    fn finish(self) -> StageScore {
        let mut score = StageScore::new(self.total.clamp(0, 100) as u8);
        score.strengths = self.strengths;
        score.weaknesses = self.weaknesses;
        score
    }
}

fn score_goals(answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    let mut sheet = StageSheet::new(60);
    sheet.penalize_missing(Stage::Goals, answers);

    if let Some(goal) = answers.text("1-2") {
        if goal.chars().count() >= 20 {
            sheet.strength(10, "investment goal is clearly articulated");
        } else {
            sheet.weakness(5, "investment goal is vague or underspecified");
            signals.tag(AdviceTag::VagueGoal);
        }
    }

    if let Some(raw) = answers.text("1-3") {
        if let Some(horizon) = Horizon::parse(raw) {
            sheet.add(5);
            signals.horizon = Some(horizon);
        }
    }

    if let Some(raw) = answers.text("1-4") {
        if let Some(appetite) = RiskAppetite::parse(raw) {
            sheet.add(5);
            signals.risk_appetite = Some(appetite);
        }
    }

    if let Some(target) = answers.text("1-5") {
        match first_percent(target) {
            Some(pct) => {
                signals.yield_target_pct = Some(pct);
                if pct > 30.0 {
                    sheet.weakness(10, "return target looks unrealistic");
                    signals.tag(AdviceTag::UnrealisticYield);
                } else {
                    sheet.strength(8, "return target is quantified");
                }
            }
            None => sheet.weakness(4, "return target carries no figure"),
        }
    }

    if let Some(loss) = answers.text("1-6") {
        if first_percent(loss).is_some() {
            sheet.strength(8, "loss tolerance is quantified");
        } else {
            sheet.weakness(4, "loss tolerance carries no figure");
        }
    }

    sheet.finish()
}

fn score_method(answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    let mut sheet = StageSheet::new(55);
    sheet.penalize_missing(Stage::Method, answers);

    let methods = answers.choices("2-1");
    match methods.len() {
        0 => {}
        1 => {
            sheet.add(3);
            sheet
                .weaknesses
                .push("thesis rests on a single analysis method".to_string());
            signals.tag(AdviceTag::SingleMethod);
        }
        _ => sheet.strength(10, "multiple analysis methods corroborate the thesis"),
    }

    if let Some(rationale) = answers.text("2-2") {
        if rationale.chars().count() >= 40 {
            sheet.strength(10, "method rationale is well developed");
        } else {
            sheet.weakness(5, "method rationale is thin");
        }
        if contains_any(rationale, DATA_KEYWORDS) {
            sheet.strength(5, "rationale cites data or backtesting");
        }
    }

    if answers.text("2-3").is_some() {
        sheet.add(4);
    }

    sheet.finish()
}

fn score_trade_rules(answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    let mut sheet = StageSheet::new(50);
    sheet.penalize_missing(Stage::TradeRules, answers);

    let rules = [
        ("3-1", "entry rule", None),
        ("3-2", "exit rule", None),
        ("3-3", "stop-loss rule", Some(AdviceTag::MissingStopLoss)),
    ];

    for (id, name, missing_tag) in rules {
        match answers.text(id) {
            Some(rule) => {
                if first_percent(rule).is_some() {
                    sheet.strength(14, format!("{name} is quantified"));
                    signals.quantified_rules += 1;
                } else {
                    sheet.add(4);
                    sheet
                        .weaknesses
                        .push(format!("{name} lacks a numeric trigger"));
                    signals.tag(AdviceTag::UnquantifiedRules);
                }
                if contains_any(rule, SUBJECTIVE_KEYWORDS) {
                    sheet.weakness(8, format!("{name} relies on subjective judgement"));
                }
            }
            None => {
                if let Some(tag) = missing_tag {
                    signals.tag(tag);
                }
            }
        }
    }

    sheet.finish()
}

fn score_risk_control(answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    let mut sheet = StageSheet::new(50);
    sheet.penalize_missing(Stage::RiskControl, answers);

    if let Some(position) = answers.text("4-1") {
        if first_percent(position).is_some() {
            sheet.strength(12, "position sizing is quantified");
        } else {
            sheet.add(4);
            sheet
                .weaknesses
                .push("position sizing carries no figure".to_string());
            signals.tag(AdviceTag::UnquantifiedRules);
        }
    }

    if let Some(drawdown) = answers.text("4-2") {
        if first_percent(drawdown).is_some() {
            sheet.strength(8, "drawdown tolerance is quantified");
        }
    }

    let mitigations = answers.choices("4-3");
    match mitigations.len() {
        0 => {
            if answers.get("4-3").is_some() {
                sheet.weakness(12, "no risk mitigation selected");
                signals.tag(AdviceTag::ThinRiskMitigation);
            }
        }
        1 => {
            sheet.add(3);
            sheet
                .weaknesses
                .push("risk mitigation relies on a single measure".to_string());
            signals.tag(AdviceTag::ThinRiskMitigation);
        }
        2 => sheet.add(8),
        _ => sheet.strength(15, "risk mitigation is diversified"),
    }

    if let Some(reserve) = answers.text("4-4") {
        if let Some(liquidity) = liquidity_score(reserve) {
            signals.liquidity_score = Some(liquidity);
            if liquidity >= 65 {
                sheet.strength(5, "liquidity buffer covers the horizon");
            } else if liquidity <= 35 {
                sheet.weakness(6, "liquidity buffer is thin");
            }
        }
    }

    sheet.finish()
}

fn score_verification(answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    let mut sheet = StageSheet::new(55);
    sheet.penalize_missing(Stage::Verification, answers);

    let sources = answers.choices("5-1");
    match sources.len() {
        0 => {}
        1 => {
            sheet.add(3);
            sheet
                .weaknesses
                .push("information rests on a single source".to_string());
        }
        _ => sheet.strength(10, "information is drawn from independent sources"),
    }

    if let Some(raw) = answers.text("5-2") {
        if is_affirmative(raw) {
            sheet.strength(10, "key facts were cross-verified");
        } else {
            sheet.weakness(10, "key facts were not cross-verified");
            signals.tag(AdviceTag::NoCrossVerification);
        }
    }

    if let Some(note) = answers.text("5-3") {
        if note.chars().count() >= 20 {
            sheet.add(5);
        }
    }

    sheet.finish()
}

fn score_bias_check(answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    let mut sheet = StageSheet::new(60);
    sheet.penalize_missing(Stage::BiasCheck, answers);

    let biases = answers.choices("6-1");
    match biases.len() {
        0 => {
            if answers.get("6-1").is_some() {
                sheet.weakness(8, "no cognitive bias was reviewed");
                signals.tag(AdviceTag::BiasUnchecked);
            }
        }
        1 | 2 => sheet.add(5),
        _ => sheet.strength(12, "multiple cognitive biases were reviewed"),
    }

    if let Some(raw) = answers.text("6-2") {
        if is_affirmative(raw) {
            sheet.strength(10, "a contrarian view was sought out");
        } else {
            sheet.weakness(8, "no contrarian view was considered");
            signals.tag(AdviceTag::NoContrarianView);
        }
    }

    if let Some(state) = answers.text("6-3") {
        let normalized = state.trim().to_ascii_lowercase();
        if normalized.contains("calm") || normalized.contains("平静") {
            sheet.add(5);
        } else if contains_any(&normalized, ELEVATED_EMOTIONS) {
            sheet.weakness(8, "decision is being taken in an elevated emotional state");
            signals.tag(AdviceTag::EmotionalState);
        }
    }

    sheet.finish()
}

fn score_documentation(answers: &AnswerSet, signals: &mut ScoreSignals) -> StageScore {
    let mut sheet = StageSheet::new(60);
    sheet.penalize_missing(Stage::Documentation, answers);

    if let Some(raw) = answers.text("7-1") {
        if is_affirmative(raw) {
            sheet.strength(10, "the decision will be recorded in writing");
        } else {
            sheet.weakness(8, "the decision will not be written down");
        }
    }

    match answers.date("7-2") {
        Some(_) => sheet.strength(10, "a review checkpoint is scheduled"),
        None => {
            sheet.weakness(5, "no review date is set");
            signals.tag(AdviceTag::NoReviewDate);
        }
    }

    if answers.text("7-3").is_some() {
        sheet.add(5);
    }

    sheet.finish()
}

const SUBJECTIVE_KEYWORDS: &[&str] = &["feel", "gut", "intuition", "hunch", "感觉", "直觉"];
const DATA_KEYWORDS: &[&str] = &["backtest", "data", "historical", "回测", "数据", "财报"];
const ELEVATED_EMOTIONS: &[&str] = &["anxious", "excited", "fomo", "fear", "焦虑", "兴奋"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lowered = haystack.to_lowercase();
    needles.iter().any(|needle| lowered.contains(needle))
}

fn is_affirmative(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    value == "yes" || value == "y" || value == "true" || value.contains("是")
}

/// First percentage figure in a free-text answer ("15%", "15 %", "15％").
pub(crate) fn first_percent(text: &str) -> Option<f32> {
    let chars: Vec<char> = text.chars().collect();
    for (index, c) in chars.iter().enumerate() {
        if *c != '%' && *c != '％' {
            continue;
        }
        let mut start = index;
        while start > 0 {
            let prev = chars[start - 1];
            if prev.is_ascii_digit() || prev == '.' {
                start -= 1;
            } else if prev == ' ' && start == index {
                start -= 1;
            } else {
                break;
            }
        }
        let digits: String = chars[start..index]
            .iter()
            .filter(|c| c.is_ascii_digit() || **c == '.')
            .collect();
        if let Ok(value) = digits.parse::<f32>() {
            return Some(value);
        }
    }
    None
}

/// Liquidity score derived from the cash-reserve answer; higher means a
/// longer runway of covered expenses.
fn liquidity_score(raw: &str) -> Option<u8> {
    let value = raw.trim().to_ascii_lowercase();
    if value.contains("none") || value.contains("无") {
        Some(10)
    } else if value.contains("under") || value.contains("less") || value.starts_with('<') {
        Some(35)
    } else if value.contains("3-6") || (value.contains('3') && value.contains('6')) {
        Some(65)
    } else if value.contains("over") || value.contains("6+") || value.starts_with('>') {
        Some(90)
    } else {
        None
    }
}
