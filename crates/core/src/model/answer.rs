use crate::model::ids::QuestionId;

/// The option a user picked for one question.
///
/// Holds the option text rather than its slot; scoring compares text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub response: String,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(question_id: QuestionId, response: impl Into<String>) -> Self {
        Self {
            question_id,
            response: response.into(),
        }
    }
}
