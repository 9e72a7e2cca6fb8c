use chrono::NaiveDate;

use super::catalog::{QuestionKind, QUESTIONS};
use super::domain::{AnswerSet, AnswerValue};

/// Pre-scoring input validation: every required question must carry a
/// non-blank answer of the expected kind. Returns the offending question
/// ids in catalog order; scoring must not proceed when this is non-empty.
pub fn validate(answers: &AnswerSet) -> Vec<String> {
    let mut problems = Vec::new();

    for question in QUESTIONS {
        match answers.get(question.id) {
            None => {
                if question.required {
                    problems.push(question.id.to_string());
                }
            }
            Some(value) => {
                if question.required && value.is_blank() {
                    problems.push(question.id.to_string());
                } else if !kind_matches(question.kind, value) {
                    problems.push(question.id.to_string());
                }
            }
        }
    }

    problems
}

fn kind_matches(kind: QuestionKind, value: &AnswerValue) -> bool {
    match kind {
        QuestionKind::ShortText | QuestionKind::LongText | QuestionKind::SingleChoice => {
            matches!(value, AnswerValue::Text(_))
        }
        QuestionKind::MultiChoice => matches!(value, AnswerValue::Choices(_)),
        QuestionKind::Date => match value {
            AnswerValue::Date(_) => true,
            AnswerValue::Text(text) => text.trim().parse::<NaiveDate>().is_ok(),
            AnswerValue::Choices(_) => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_set_reports_all_required_ids() {
        let problems = validate(&AnswerSet::new());
        assert!(problems.contains(&"1-1".to_string()));
        assert!(problems.contains(&"3-3".to_string()));
        assert_eq!(
            problems.len(),
            QUESTIONS.iter().filter(|question| question.required).count()
        );
    }

    #[test]
    fn blank_required_text_is_reported() {
        let mut answers = AnswerSet::new();
        answers.insert("1-1", AnswerValue::Text("  ".to_string()));
        let problems = validate(&answers);
        assert!(problems.contains(&"1-1".to_string()));
    }

    #[test]
    fn kind_mismatch_is_reported_even_for_optional_questions() {
        let mut answers = AnswerSet::new();
        answers.insert("7-2", AnswerValue::Text("next quarter".to_string()));
        let problems = validate(&answers);
        assert!(problems.contains(&"7-2".to_string()));
    }

    #[test]
    fn iso_text_is_accepted_for_date_questions() {
        let mut answers = AnswerSet::new();
        answers.insert("7-2", AnswerValue::Text("2026-09-01".to_string()));
        let problems = validate(&answers);
        assert!(!problems.contains(&"7-2".to_string()));
    }

    #[test]
    fn date_like_free_text_stays_valid_for_text_questions() {
        let mut answers = AnswerSet::new();
        answers.insert("2-3", AnswerValue::Text("2026-03-01".to_string()));
        let problems = validate(&answers);
        assert!(!problems.contains(&"2-3".to_string()));
    }
}
