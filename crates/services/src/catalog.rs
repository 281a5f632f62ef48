use std::sync::Arc;

use quiz_core::model::{LeaderboardEntry, QuizSummary, UserId, UserStats, WeeklyContest};
use tracing::warn;

use crate::Clock;
use crate::error::GatewayError;
use crate::fallback;
use crate::gateway::QuizBackend;

/// Where a listing's items came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Live,
    /// Placeholder data served because the backend call failed.
    Fallback,
}

/// Read-only result tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: T,
    pub source: ListingSource,
}

impl<T> Listing<T> {
    #[must_use]
    pub fn live(items: T) -> Self {
        Self {
            items,
            source: ListingSource::Live,
        }
    }

    #[must_use]
    pub fn fallback(items: T) -> Self {
        Self {
            items,
            source: ListingSource::Fallback,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == ListingSource::Fallback
    }
}

/// Dashboard, leaderboard and profile listings.
#[derive(Clone)]
pub struct CatalogService {
    clock: Clock,
    backend: Arc<dyn QuizBackend>,
    offline_fallback: bool,
}

impl CatalogService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn QuizBackend>, offline_fallback: bool) -> Self {
        Self {
            clock,
            backend,
            offline_fallback,
        }
    }

    #[must_use]
    pub fn offline_fallback(&self) -> bool {
        self.offline_fallback
    }

    fn recover<T>(
        &self,
        what: &str,
        result: Result<T, GatewayError>,
        placeholder: impl FnOnce() -> T,
    ) -> Result<Listing<T>, GatewayError> {
        match result {
            Ok(items) => Ok(Listing::live(items)),
            Err(err) if self.offline_fallback => {
                warn!("{what} unavailable ({err}); serving placeholder data");
                Ok(Listing::fallback(placeholder()))
            }
            Err(err) => Err(err),
        }
    }

    /// # Errors
    ///
    /// Returns `GatewayError` only when offline fallback is disabled.
    pub async fn quizzes(&self) -> Result<Listing<Vec<QuizSummary>>, GatewayError> {
        let result = self.backend.list_quizzes().await;
        self.recover("quiz catalog", result, fallback::quizzes)
    }

    /// # Errors
    ///
    /// Returns `GatewayError` only when offline fallback is disabled.
    pub async fn weekly_contests(&self) -> Result<Listing<Vec<WeeklyContest>>, GatewayError> {
        let result = self.backend.weekly_contests().await;
        let now = self.clock.now();
        self.recover("weekly contests", result, || fallback::weekly_contests(now))
    }

    /// # Errors
    ///
    /// Returns `GatewayError` only when offline fallback is disabled.
    pub async fn leaderboard(&self) -> Result<Listing<Vec<LeaderboardEntry>>, GatewayError> {
        let result = self.backend.leaderboard().await;
        self.recover("leaderboard", result, fallback::leaderboard)
    }

    /// # Errors
    ///
    /// Returns `GatewayError` only when offline fallback is disabled.
    pub async fn user_stats(&self, user_id: UserId) -> Result<Listing<UserStats>, GatewayError> {
        let result = self.backend.user_stats(user_id).await;
        self.recover("user statistics", result, fallback::user_stats)
    }
}
