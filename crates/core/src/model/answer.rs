use serde::Serialize;

use crate::model::question::{AnswerToken, Question};

/// Record of a single answered question.
///
/// Appended once per answer and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: Question,
    pub selected: AnswerToken,
    pub correct: AnswerToken,
    pub is_correct: bool,
}

impl AnswerRecord {
    /// Grades `selected` against the question's correct answer.
    #[must_use]
    pub fn grade(question: Question, selected: AnswerToken) -> Self {
        let correct = question.correct_answer();
        Self {
            question,
            selected,
            correct,
            is_correct: selected == correct,
        }
    }
}
