use crate::model::{AnswerRecord, QuizId};

/// Lifecycle of one quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    InProgress,
    Submitting,
    Terminated(SessionOutcome),
}

impl SessionPhase {
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        matches!(self, SessionPhase::Terminated(_))
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The attempt was submitted. `confirmed` is false when the backend
    /// never returned a score and zero was recorded instead.
    Scored { score: u32, confirmed: bool },
    /// Questions could not be loaded, or the quiz has none.
    NoContent,
    /// The user left before submitting.
    Abandoned,
}

/// What started a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTrigger {
    Manual,
    TimeExpired,
}

/// Answers to send to the backend, ordered by question sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub quiz_id: QuizId,
    pub answers: Vec<AnswerRecord>,
    pub trigger: SubmissionTrigger,
}

/// Result of one countdown step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    /// The budget ran out on this tick; the caller must score the submission.
    Expired(Submission),
    /// The session is not in progress; the countdown should stop.
    Stopped,
}
