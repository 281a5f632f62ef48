use std::fmt;

use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,
}

//
// ─── OPTION SLOT ───────────────────────────────────────────────────────────────
//

/// Position of an option within a question (A through D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionSlot {
    A,
    B,
    C,
    D,
}

impl OptionSlot {
    pub const ALL: [OptionSlot; 4] = [OptionSlot::A, OptionSlot::B, OptionSlot::C, OptionSlot::D];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            OptionSlot::A => 0,
            OptionSlot::B => 1,
            OptionSlot::C => 2,
            OptionSlot::D => 3,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            OptionSlot::A => 'A',
            OptionSlot::B => 'B',
            OptionSlot::C => 'C',
            OptionSlot::D => 'D',
        }
    }

    /// Maps a number key (`1`-`4`) to a slot.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(OptionSlot::A),
            '2' => Some(OptionSlot::B),
            '3' => Some(OptionSlot::C),
            '4' => Some(OptionSlot::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question as delivered by the backend.
///
/// Immutable once constructed; the correct answer is never sent to the client.
/// Unused slots (for example on a true/false question) hold an empty string
/// and can never be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; 4],
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: [String; 4],
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        Ok(Self {
            id,
            prompt,
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, slot: OptionSlot) -> &str {
        &self.options[slot.index()]
    }

    /// Whether `slot` holds a selectable option.
    #[must_use]
    pub fn has_option(&self, slot: OptionSlot) -> bool {
        !self.options[slot.index()].trim().is_empty()
    }

    /// Finds the selectable slot holding the given option text, if any.
    #[must_use]
    pub fn slot_of(&self, option: &str) -> Option<OptionSlot> {
        OptionSlot::ALL
            .into_iter()
            .filter(|slot| self.has_option(*slot))
            .find(|slot| self.options[slot.index()] == option)
    }
}
