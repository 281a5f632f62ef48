//! Placeholder listings shown while the backend is unavailable.

use chrono::{DateTime, Utc};
use quiz_core::model::{LeaderboardEntry, QuizId, QuizSummary, UserId, UserStats, WeeklyContest};

#[must_use]
pub fn quizzes() -> Vec<QuizSummary> {
    vec![
        QuizSummary {
            id: QuizId::new(1),
            title: "Java Fundamentals".into(),
            category: "Programming".into(),
            question_count: 10,
        },
        QuizSummary {
            id: QuizId::new(2),
            title: "Spring Boot Advanced".into(),
            category: "Frameworks".into(),
            question_count: 15,
        },
    ]
}

#[must_use]
pub fn leaderboard() -> Vec<LeaderboardEntry> {
    [("TopCoder", 2500), ("JavaGuru", 2100), ("SpringMaster", 1800)]
        .into_iter()
        .zip(1u32..)
        .map(|((username, score), rank)| LeaderboardEntry {
            id: UserId::new(u64::from(rank)),
            username: username.into(),
            score,
            rank,
        })
        .collect()
}

/// A single contest that starts and ends at `now`.
#[must_use]
pub fn weekly_contests(now: DateTime<Utc>) -> Vec<WeeklyContest> {
    vec![WeeklyContest {
        id: 1,
        title: "Java Weekly Challenge".into(),
        starts_at: now,
        ends_at: now,
        prize_pool: "5000".into(),
    }]
}

#[must_use]
pub fn user_stats() -> UserStats {
    UserStats::default()
}
