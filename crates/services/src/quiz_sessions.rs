use std::sync::Arc;

use quiz_core::QuizSession;
use quiz_core::model::QuizId;
use quiz_core::session::{SessionOutcome, Submission, TimeBudget};
use tracing::{info, warn};

use crate::gateway::QuizBackend;

/// Connects quiz sessions to the backend: loads questions and scores
/// submissions.
#[derive(Clone)]
pub struct QuizSessionService {
    backend: Arc<dyn QuizBackend>,
    budget: TimeBudget,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(backend: Arc<dyn QuizBackend>, budget: TimeBudget) -> Self {
        Self { backend, budget }
    }

    #[must_use]
    pub fn budget(&self) -> TimeBudget {
        self.budget
    }

    /// Creates a session for `quiz_id` and loads its questions.
    ///
    /// Never fails: an unreachable backend or an empty quiz yields a session
    /// terminated with `NoContent`.
    pub async fn start(&self, quiz_id: QuizId) -> QuizSession {
        let mut session = QuizSession::new(quiz_id, self.budget);
        self.load_into(&mut session).await;
        session
    }

    /// Fetches questions for a session that is still loading.
    pub async fn load_into(&self, session: &mut QuizSession) {
        let quiz_id = session.quiz_id();
        match self.backend.load_questions(quiz_id).await {
            Ok(questions) => {
                info!("loaded {} questions for quiz {quiz_id}", questions.len());
                if questions.is_empty() {
                    warn!("quiz {quiz_id} has no questions");
                }
                session.load(questions);
            }
            Err(err) => {
                warn!("could not load quiz {quiz_id}: {err}");
                session.load_failed();
            }
        }
    }

    /// Sends a submission for scoring. `None` means scoring failed.
    pub async fn score(&self, submission: &Submission) -> Option<u32> {
        match self
            .backend
            .submit_answers(submission.quiz_id, &submission.answers)
            .await
        {
            Ok(score) => {
                info!(
                    "quiz {} scored {score} ({:?})",
                    submission.quiz_id, submission.trigger
                );
                Some(score)
            }
            Err(err) => {
                warn!("scoring quiz {} failed: {err}", submission.quiz_id);
                None
            }
        }
    }

    /// Submits manually and records the result on the session.
    ///
    /// Returns `None` without contacting the backend if the session is not in
    /// progress, so a repeated call sends nothing.
    pub async fn submit(&self, session: &mut QuizSession) -> Option<SessionOutcome> {
        let submission = session.begin_submission()?;
        let score = self.score(&submission).await;
        session.complete_submission(score);
        session.outcome()
    }
}
