use quiz_core::QuizSession;
use quiz_core::model::OptionSlot;
use quiz_core::session::{SessionOutcome, SessionPhase, Submission, TickOutcome};

use crate::vm::palette_vm::{PaletteButtonVm, palette_buttons};
use crate::vm::time_fmt::format_countdown;

/// User actions in the quiz room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(OptionSlot),
    Clear,
    ToggleMark,
    Next,
    Previous,
    GoTo(usize),
    Submit,
    Exit,
}

impl QuizIntent {
    /// Maps a key name (as reported by the webview) to an intent.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            "Backspace" | "Delete" | "c" | "C" => Some(Self::Clear),
            "m" | "M" => Some(Self::ToggleMark),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => OptionSlot::from_key(ch).map(Self::Select),
                    _ => None,
                }
            }
        }
    }
}

/// What the view must do after an intent was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizEffect {
    None,
    /// Send this submission for scoring.
    Score(Submission),
    /// The user left the quiz.
    Left,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub slot: OptionSlot,
    pub letter: char,
    pub text: String,
    pub selected: bool,
    /// False for an empty slot, which renders as a disabled button.
    pub available: bool,
}

impl OptionVm {
    #[must_use]
    pub fn classes(&self) -> &'static str {
        if !self.available {
            "option option--empty"
        } else if self.selected {
            "option option--selected"
        } else {
            "option"
        }
    }
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn apply(&mut self, intent: QuizIntent) -> QuizEffect {
        let session = &mut self.session;
        match intent {
            QuizIntent::Select(slot) => {
                session.select_slot(slot);
            }
            QuizIntent::Clear => {
                session.clear_answer();
            }
            QuizIntent::ToggleMark => {
                session.toggle_review_mark();
            }
            QuizIntent::Next => {
                session.next();
            }
            QuizIntent::Previous => {
                session.previous();
            }
            QuizIntent::GoTo(index) => {
                session.go_to(index);
            }
            QuizIntent::Submit => {
                return session
                    .begin_submission()
                    .map_or(QuizEffect::None, QuizEffect::Score);
            }
            QuizIntent::Exit => {
                if session.exit() {
                    return QuizEffect::Left;
                }
            }
        }
        QuizEffect::None
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.session.tick()
    }

    /// Records the score. Returns the final outcome when it was accepted.
    pub fn finish(&mut self, score: Option<u32>) -> Option<SessionOutcome> {
        if self.session.complete_submission(score) {
            self.session.outcome()
        } else {
            None
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session.is_in_progress()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.session.phase() == SessionPhase::Submitting
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        format_countdown(self.session.remaining_secs())
    }

    #[must_use]
    pub fn timer_is_low(&self) -> bool {
        self.session.clock().is_low()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!(
            "Question {} of {}",
            self.session.current_index() + 1,
            self.session.question_count()
        )
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.session.current_question().map(|q| q.prompt())
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let Some(question) = self.session.current_question() else {
            return Vec::new();
        };
        let selected = self.session.current_answer();
        OptionSlot::ALL
            .into_iter()
            .map(|slot| {
                let text = question.option(slot);
                OptionVm {
                    slot,
                    letter: slot.letter(),
                    text: text.to_string(),
                    selected: question.has_option(slot) && selected == Some(text),
                    available: question.has_option(slot),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn mark_label(&self) -> &'static str {
        if self.session.is_marked(self.session.current_index()) {
            "Unmark Review"
        } else {
            "Mark for Review"
        }
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.session.is_in_progress() && !self.session.is_first()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.session.is_in_progress() && !self.session.is_last()
    }

    #[must_use]
    pub fn palette(&self) -> Vec<PaletteButtonVm> {
        palette_buttons(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::model::{Question, QuestionId, QuizId};
    use quiz_core::session::TimeBudget;

    use super::*;

    fn vm(count: u64, budget: u32) -> QuizVm {
        let mut session = QuizSession::new(QuizId::new(1), TimeBudget::from_secs(budget).unwrap());
        session.load(
            (1..=count)
                .map(|id| {
                    Question::new(
                        QuestionId::new(id),
                        format!("Q{id}"),
                        ["w".into(), "x".into(), "y".into(), "z".into()],
                    )
                    .unwrap()
                })
                .collect(),
        );
        QuizVm::new(session)
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(QuizIntent::from_key("ArrowRight"), Some(QuizIntent::Next));
        assert_eq!(QuizIntent::from_key("ArrowLeft"), Some(QuizIntent::Previous));
        assert_eq!(
            QuizIntent::from_key("3"),
            Some(QuizIntent::Select(OptionSlot::C))
        );
        assert_eq!(QuizIntent::from_key("M"), Some(QuizIntent::ToggleMark));
        assert_eq!(QuizIntent::from_key("c"), Some(QuizIntent::Clear));
        assert_eq!(QuizIntent::from_key("Delete"), Some(QuizIntent::Clear));
        assert_eq!(QuizIntent::from_key("Enter"), None);
        assert_eq!(QuizIntent::from_key("7"), None);
    }

    #[test]
    fn options_reflect_selection() {
        let mut vm = vm(2, 60);
        vm.apply(QuizIntent::Select(OptionSlot::B));
        let options = vm.options();
        assert_eq!(options.len(), 4);
        assert!(options[1].selected);
        assert_eq!(options[1].letter, 'B');
        assert!(!options[0].selected);
        assert!(options.iter().all(|option| option.available));
    }

    #[test]
    fn empty_slots_are_unavailable() {
        let mut session = QuizSession::new(QuizId::new(1), TimeBudget::default());
        session.load(vec![
            Question::new(
                QuestionId::new(1),
                "Is unsafe Rust still checked?",
                ["Partly".into(), "No".into(), String::new(), String::new()],
            )
            .unwrap(),
        ]);
        let mut vm = QuizVm::new(session);
        vm.apply(QuizIntent::Select(OptionSlot::D));
        let options = vm.options();
        assert!(options[1].available);
        assert!(!options[3].available);
        assert!(!options[3].selected);
        assert_eq!(options[3].classes(), "option option--empty");
        assert_eq!(vm.session().current_answer(), None);
    }

    #[test]
    fn submit_intent_yields_one_submission() {
        let mut vm = vm(2, 60);
        assert!(matches!(vm.apply(QuizIntent::Submit), QuizEffect::Score(_)));
        assert_eq!(vm.apply(QuizIntent::Submit), QuizEffect::None);
        assert!(vm.is_submitting());
        assert_eq!(
            vm.finish(Some(2)),
            Some(SessionOutcome::Scored {
                score: 2,
                confirmed: true
            })
        );
        assert_eq!(vm.finish(Some(3)), None);
    }

    #[test]
    fn labels_track_navigation_and_timer() {
        let mut vm = vm(3, 301);
        assert_eq!(vm.progress_label(), "Question 1 of 3");
        assert!(!vm.can_go_previous());
        assert_eq!(vm.timer_label(), "05:01");
        assert!(!vm.timer_is_low());
        vm.tick();
        vm.tick();
        assert!(vm.timer_is_low());
        vm.apply(QuizIntent::GoTo(2));
        assert!(!vm.can_go_next());
        assert_eq!(vm.mark_label(), "Mark for Review");
        vm.apply(QuizIntent::ToggleMark);
        assert_eq!(vm.mark_label(), "Unmark Review");
    }

    #[test]
    fn exit_leaves_once() {
        let mut vm = vm(1, 60);
        assert_eq!(vm.apply(QuizIntent::Exit), QuizEffect::Left);
        assert_eq!(vm.apply(QuizIntent::Exit), QuizEffect::None);
        assert_eq!(vm.tick(), TickOutcome::Stopped);
    }
}
