//! Read-only catalog entries shown on the dashboard, leaderboard and profile.

use chrono::{DateTime, Utc};

use crate::model::ids::{QuizId, UserId};

/// A quiz available to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub category: String,
    pub question_count: u32,
}

/// Distinct categories in catalog order.
#[must_use]
pub fn categories(quizzes: &[QuizSummary]) -> Vec<String> {
    let mut seen = Vec::new();
    for quiz in quizzes {
        if !seen.iter().any(|c: &String| c == &quiz.category) {
            seen.push(quiz.category.clone());
        }
    }
    seen
}

/// An active weekly contest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyContest {
    pub id: u64,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub prize_pool: String,
}

/// One row of the global leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: UserId,
    pub username: String,
    pub score: u64,
    pub rank: u32,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn is_podium(&self) -> bool {
        (1..=3).contains(&self.rank)
    }
}

/// A finished attempt as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    pub quiz_title: String,
    pub score: u32,
    /// Date as delivered by the backend; it is displayed verbatim.
    pub date: String,
}

/// Aggregated statistics for the profile screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserStats {
    pub total_quizzes: u32,
    pub average_score: f64,
    pub highest_score: u32,
    pub attempts: Vec<QuizAttempt>,
}
