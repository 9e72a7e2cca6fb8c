use super::domain::Stage;

/// Expected shape of an answer. Used for input validation only; scoring
/// reads answers through the typed accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    ShortText,
    LongText,
    SingleChoice,
    MultiChoice,
    Date,
}

/// Catalog entry for one checkpoint question.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub stage: Stage,
    pub kind: QuestionKind,
    pub required: bool,
}

const fn q(id: &'static str, stage: Stage, kind: QuestionKind, required: bool) -> Question {
    Question {
        id,
        stage,
        kind,
        required,
    }
}

/// The fixed decision-checkpoint questionnaire. Ids are stable and
/// prefixed with the stage number; the collector layer owns the wording.
pub const QUESTIONS: &[Question] = &[
    q("1-1", Stage::Goals, QuestionKind::ShortText, true),
    q("1-2", Stage::Goals, QuestionKind::LongText, true),
    q("1-3", Stage::Goals, QuestionKind::SingleChoice, true),
    q("1-4", Stage::Goals, QuestionKind::SingleChoice, true),
    q("1-5", Stage::Goals, QuestionKind::ShortText, false),
    q("1-6", Stage::Goals, QuestionKind::ShortText, false),
    q("2-1", Stage::Method, QuestionKind::MultiChoice, true),
    q("2-2", Stage::Method, QuestionKind::LongText, false),
    q("2-3", Stage::Method, QuestionKind::ShortText, false),
    q("3-1", Stage::TradeRules, QuestionKind::LongText, true),
    q("3-2", Stage::TradeRules, QuestionKind::LongText, true),
    q("3-3", Stage::TradeRules, QuestionKind::LongText, true),
    q("4-1", Stage::RiskControl, QuestionKind::ShortText, true),
    q("4-2", Stage::RiskControl, QuestionKind::ShortText, false),
    q("4-3", Stage::RiskControl, QuestionKind::MultiChoice, true),
    q("4-4", Stage::RiskControl, QuestionKind::SingleChoice, false),
    q("5-1", Stage::Verification, QuestionKind::MultiChoice, true),
    q("5-2", Stage::Verification, QuestionKind::SingleChoice, false),
    q("5-3", Stage::Verification, QuestionKind::LongText, false),
    q("6-1", Stage::BiasCheck, QuestionKind::MultiChoice, false),
    q("6-2", Stage::BiasCheck, QuestionKind::SingleChoice, false),
    q("6-3", Stage::BiasCheck, QuestionKind::SingleChoice, false),
    q("7-1", Stage::Documentation, QuestionKind::SingleChoice, false),
    q("7-2", Stage::Documentation, QuestionKind::Date, false),
    q("7-3", Stage::Documentation, QuestionKind::ShortText, false),
];

pub fn stage_questions(stage: Stage) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |question| question.stage == stage)
}
