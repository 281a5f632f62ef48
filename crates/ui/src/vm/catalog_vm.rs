use quiz_core::model::catalog::categories;
use quiz_core::model::{LeaderboardEntry, QuizSummary, UserStats, WeeklyContest, initial_of};

use crate::vm::time_fmt::format_date;

pub const ALL_CATEGORIES: &str = "All";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub question_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContestBannerVm {
    pub title: String,
    pub window: String,
    pub prize_pool: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank: u32,
    pub initial: String,
    pub username: String,
    pub score: String,
    pub podium: bool,
}

impl LeaderboardRowVm {
    #[must_use]
    pub fn classes(&self) -> String {
        if self.podium {
            format!("podium rank-{}", self.rank)
        } else {
            String::new()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub quiz_title: String,
    pub score: u32,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub total_quizzes: u32,
    pub average_score: String,
    pub highest_score: u32,
    pub attempts: Vec<AttemptRowVm>,
}

/// `All` followed by each distinct category in catalog order.
#[must_use]
pub fn category_options(quizzes: &[QuizSummary]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    options.extend(categories(quizzes));
    options
}

#[must_use]
pub fn quiz_cards(quizzes: &[QuizSummary], category: &str) -> Vec<QuizCardVm> {
    quizzes
        .iter()
        .filter(|quiz| category == ALL_CATEGORIES || quiz.category == category)
        .map(|quiz| QuizCardVm {
            id: quiz.id.value(),
            title: quiz.title.clone(),
            category: quiz.category.clone(),
            question_label: match quiz.question_count {
                1 => "1 Question".to_string(),
                n => format!("{n} Questions"),
            },
        })
        .collect()
}

#[must_use]
pub fn contest_banner(contests: &[WeeklyContest]) -> Option<ContestBannerVm> {
    contests.first().map(|contest| ContestBannerVm {
        title: contest.title.clone(),
        window: format!(
            "{} - {}",
            format_date(contest.starts_at),
            format_date(contest.ends_at)
        ),
        prize_pool: contest.prize_pool.clone(),
    })
}

#[must_use]
pub fn leaderboard_rows(entries: &[LeaderboardEntry]) -> Vec<LeaderboardRowVm> {
    entries
        .iter()
        .map(|entry| LeaderboardRowVm {
            rank: entry.rank,
            initial: initial_of(&entry.username),
            username: entry.username.clone(),
            score: format_thousands(entry.score),
            podium: entry.is_podium(),
        })
        .collect()
}

#[must_use]
pub fn stats_vm(stats: &UserStats) -> StatsVm {
    StatsVm {
        total_quizzes: stats.total_quizzes,
        average_score: format!("{:.1}", stats.average_score),
        highest_score: stats.highest_score,
        attempts: stats
            .attempts
            .iter()
            .map(|attempt| AttemptRowVm {
                quiz_title: attempt.quiz_title.clone(),
                score: attempt.score,
                date: attempt.date.clone(),
            })
            .collect(),
    }
}

/// Groups digits by thousands: `12500` → `12,500`.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parses the "join by id" input; only positive integers are accepted.
#[must_use]
pub fn parse_join_id(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok().filter(|id| *id > 0)
}
