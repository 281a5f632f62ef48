//! The quiz session engine: one timed attempt at a quiz's question set.
//!
//! The engine is synchronous and owns no I/O. Network calls (loading and
//! scoring) happen outside and report back through [`QuizSession::load`],
//! [`QuizSession::load_failed`] and [`QuizSession::complete_submission`].

mod clock;
mod phase;
mod status;

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::model::{AnswerRecord, OptionSlot, Question, QuestionId, QuizId};

pub use clock::{DEFAULT_TIME_BUDGET_SECS, LOW_TIME_THRESHOLD_SECS, SessionClock, TimeBudget};
pub use phase::{SessionOutcome, SessionPhase, Submission, SubmissionTrigger, TickOutcome};
pub use status::{QuestionStatus, StatusCounts};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("time budget must be > 0 seconds")]
    ZeroTimeBudget,
}

/// State of one quiz attempt.
///
/// Every mutating operation returns `true` when it was applied. Actions that
/// are not allowed in the current phase, or that point outside the question
/// list, are ignored and return `false`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz_id: QuizId,
    phase: SessionPhase,
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<QuestionId, String>,
    marked: BTreeSet<usize>,
    visited: BTreeSet<usize>,
    clock: SessionClock,
}

impl QuizSession {
    /// Creates a session waiting for its questions.
    #[must_use]
    pub fn new(quiz_id: QuizId, budget: TimeBudget) -> Self {
        Self {
            quiz_id,
            phase: SessionPhase::Loading,
            questions: Vec::new(),
            current: 0,
            answers: HashMap::new(),
            marked: BTreeSet::new(),
            visited: BTreeSet::new(),
            clock: SessionClock::new(budget),
        }
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────────
    //

    /// Installs the question list and starts the attempt.
    ///
    /// An empty list terminates the session with `NoContent`. Ignored unless
    /// the session is still loading.
    pub fn load(&mut self, questions: Vec<Question>) -> bool {
        if self.phase != SessionPhase::Loading {
            return false;
        }
        if questions.is_empty() {
            self.phase = SessionPhase::Terminated(SessionOutcome::NoContent);
            return true;
        }
        self.questions = questions;
        self.current = 0;
        self.visited.insert(0);
        self.clock = SessionClock::new(self.clock.budget());
        self.phase = SessionPhase::InProgress;
        true
    }

    /// Records that the question list could not be fetched.
    pub fn load_failed(&mut self) -> bool {
        if self.phase != SessionPhase::Loading {
            return false;
        }
        self.phase = SessionPhase::Terminated(SessionOutcome::NoContent);
        true
    }

    //
    // ─── ANSWERS AND MARKS ─────────────────────────────────────────────────────
    //

    /// Records `option` as the answer to the current question, replacing any
    /// earlier answer. The option must be one of the question's four options.
    pub fn select_answer(&mut self, option: &str) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        if question.slot_of(option).is_none() {
            return false;
        }
        self.answers.insert(question.id(), option.to_string());
        true
    }

    /// Selects the option in `slot` of the current question.
    pub fn select_slot(&mut self, slot: OptionSlot) -> bool {
        let Some(option) = self.current_question().map(|q| q.option(slot).to_string()) else {
            return false;
        };
        self.select_answer(&option)
    }

    /// Removes the current question's answer, if any.
    pub fn clear_answer(&mut self) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        let Some(id) = self.current_question().map(Question::id) else {
            return false;
        };
        self.answers.remove(&id).is_some()
    }

    /// Flips the review mark on the current question.
    pub fn toggle_review_mark(&mut self) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        if !self.marked.remove(&self.current) {
            self.marked.insert(self.current);
        }
        true
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Displays the question at `index` and marks it visited.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.is_in_progress() || index >= self.questions.len() {
            return false;
        }
        self.current = index;
        self.visited.insert(index);
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    //
    // ─── TIMER AND SUBMISSION ──────────────────────────────────────────────────
    //

    /// Advances the countdown by one second.
    ///
    /// When the budget runs out the session moves to `Submitting` and the
    /// automatic submission is returned. Outside `InProgress` nothing changes.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_in_progress() {
            return TickOutcome::Stopped;
        }
        let remaining = self.clock.tick();
        if remaining > 0 {
            return TickOutcome::Running { remaining };
        }
        match self.start_submission(SubmissionTrigger::TimeExpired) {
            Some(submission) => TickOutcome::Expired(submission),
            None => TickOutcome::Stopped,
        }
    }

    /// Starts a manual submission. Returns `None` if a submission was
    /// already started or the session is not in progress.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        self.start_submission(SubmissionTrigger::Manual)
    }

    fn start_submission(&mut self, trigger: SubmissionTrigger) -> Option<Submission> {
        if !self.is_in_progress() {
            return None;
        }
        self.phase = SessionPhase::Submitting;
        Some(Submission {
            quiz_id: self.quiz_id,
            answers: self.answer_records(),
            trigger,
        })
    }

    /// Finishes a submission with the backend's score, or `None` when scoring
    /// failed (recorded as an unconfirmed zero). Ignored unless submitting.
    pub fn complete_submission(&mut self, score: Option<u32>) -> bool {
        if self.phase != SessionPhase::Submitting {
            return false;
        }
        self.phase = SessionPhase::Terminated(SessionOutcome::Scored {
            score: score.unwrap_or(0),
            confirmed: score.is_some(),
        });
        true
    }

    /// Leaves the attempt without submitting.
    pub fn exit(&mut self) -> bool {
        if self.phase.is_terminated() {
            return false;
        }
        self.phase = SessionPhase::Terminated(SessionOutcome::Abandoned);
        true
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.phase {
            SessionPhase::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.phase == SessionPhase::InProgress
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// The recorded answer for the question at `index`.
    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<&str> {
        let question = self.questions.get(index)?;
        self.answers.get(&question.id()).map(String::as_str)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.answer_at(self.current)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    #[must_use]
    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    /// Indices flagged for review, ascending.
    pub fn marked_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.marked.iter().copied()
    }

    /// Indices displayed at least once, ascending.
    pub fn visited_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visited.iter().copied()
    }

    #[must_use]
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining()
    }

    /// Answer records in question order.
    #[must_use]
    pub fn answer_records(&self) -> Vec<AnswerRecord> {
        self.questions
            .iter()
            .filter_map(|q| {
                self.answers
                    .get(&q.id())
                    .map(|response| AnswerRecord::new(q.id(), response.clone()))
            })
            .collect()
    }

    #[must_use]
    pub fn status(&self, index: usize) -> Option<QuestionStatus> {
        if index >= self.questions.len() {
            return None;
        }
        Some(QuestionStatus::derive(
            self.answer_at(index).is_some(),
            self.is_marked(index),
            self.is_visited(index),
        ))
    }

    #[must_use]
    pub fn statuses(&self) -> Vec<QuestionStatus> {
        (0..self.questions.len())
            .filter_map(|index| self.status(index))
            .collect()
    }

    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.statuses())
    }
}
