//! Boundary to the quiz backend.

mod http;
pub mod wire;

use async_trait::async_trait;
use quiz_core::model::{
    AnswerRecord, AuthToken, Credentials, LeaderboardEntry, Question, QuizId, QuizSummary,
    Registration, User, UserId, UserStats, WeeklyContest,
};

use crate::error::GatewayError;

pub use http::HttpBackend;

/// What the login endpoint answered with on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    /// A user profile, with a token when the backend issues one.
    Profile { user: User, token: Option<AuthToken> },
    /// A bare confirmation such as "Login successful".
    Accepted { message: String },
}

/// What the signup endpoint answered with on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterReply {
    Profile(User),
    Accepted { message: String },
}

/// Source of the bearer token attached to backend calls.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<AuthToken>;
}

/// Operations offered by the quiz backend.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `GatewayError::Rejected` when the credentials are refused.
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError::Rejected` when the account cannot be created.
    async fn register(&self, registration: &Registration) -> Result<RegisterReply, GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` if the catalog cannot be fetched.
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, GatewayError>;

    /// Questions for one quiz, in server order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the questions cannot be fetched or decoded.
    async fn load_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, GatewayError>;

    /// Sends answers and returns the number scored correct.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if scoring fails.
    async fn submit_answers(
        &self,
        quiz_id: QuizId,
        answers: &[AnswerRecord],
    ) -> Result<u32, GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` if the leaderboard cannot be fetched.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` if contests cannot be fetched.
    async fn weekly_contests(&self) -> Result<Vec<WeeklyContest>, GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` if statistics cannot be fetched.
    async fn user_stats(&self, user_id: UserId) -> Result<UserStats, GatewayError>;
}
