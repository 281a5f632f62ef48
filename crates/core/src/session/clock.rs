use crate::session::SessionError;

/// Default time allowed for one attempt (30 minutes).
pub const DEFAULT_TIME_BUDGET_SECS: u32 = 1800;

/// Below this many seconds the UI switches the timer to its warning style.
pub const LOW_TIME_THRESHOLD_SECS: u32 = 300;

/// Validated number of seconds an attempt may last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget(u32);

impl TimeBudget {
    /// # Errors
    ///
    /// Returns `SessionError::ZeroTimeBudget` for a zero budget.
    pub fn from_secs(secs: u32) -> Result<Self, SessionError> {
        if secs == 0 {
            return Err(SessionError::ZeroTimeBudget);
        }
        Ok(Self(secs))
    }

    #[must_use]
    pub fn secs(self) -> u32 {
        self.0
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self(DEFAULT_TIME_BUDGET_SECS)
    }
}

/// Whole-second countdown. Never increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    budget: TimeBudget,
    remaining: u32,
}

impl SessionClock {
    #[must_use]
    pub fn new(budget: TimeBudget) -> Self {
        Self {
            budget,
            remaining: budget.secs(),
        }
    }

    #[must_use]
    pub fn budget(&self) -> TimeBudget {
        self.budget
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.budget.secs() - self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < LOW_TIME_THRESHOLD_SECS
    }

    /// Removes one second, saturating at zero, and returns what is left.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}
