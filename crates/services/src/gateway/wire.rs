//! JSON shapes exchanged with the backend and their mapping to domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use quiz_core::model::{
    AnswerRecord, LeaderboardEntry, Question, QuestionId, QuizAttempt, QuizId, QuizSummary, User,
    UserId, UserStats, WeeklyContest,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GatewayError;

pub const UNTITLED_QUESTION: &str = "Untitled Question";

fn decode<E: core::fmt::Display>(e: E) -> GatewayError {
    GatewayError::Decode(e.to_string())
}

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResponseDto<'a> {
    pub id: u64,
    pub response: &'a str,
}

impl<'a> From<&'a AnswerRecord> for ResponseDto<'a> {
    fn from(record: &'a AnswerRecord) -> Self {
        Self {
            id: record.question_id.value(),
            response: &record.response,
        }
    }
}

//
// ─── RESPONSES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl UserDto {
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: UserId::new(self.id),
            username: self.username,
            email: self.email,
        }
    }
}

/// Error body some endpoints return alongside a failure status.
#[derive(Debug, Deserialize)]
pub struct MessageDto {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub num_questions: u32,
}

impl From<QuizDto> for QuizSummary {
    fn from(dto: QuizDto) -> Self {
        Self {
            id: QuizId::new(dto.id),
            title: dto.title,
            category: dto.category,
            question_count: dto.num_questions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionDto {
    pub id: u64,
    #[serde(default, alias = "questionTitle")]
    pub question_title: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub option4: Option<String>,
}

impl TryFrom<QuestionDto> for Question {
    type Error = GatewayError;

    fn try_from(dto: QuestionDto) -> Result<Self, Self::Error> {
        let prompt = dto
            .question_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED_QUESTION.to_string());
        Question::new(
            QuestionId::new(dto.id),
            prompt,
            [dto.option1, dto.option2, dto.option3, dto.option4].map(Option::unwrap_or_default),
        )
        .map_err(|e| GatewayError::Decode(format!("question {}: {e}", dto.id)))
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardDto {
    pub id: u64,
    pub username: String,
    pub score: u64,
    pub rank: u32,
}

impl From<LeaderboardDto> for LeaderboardEntry {
    fn from(dto: LeaderboardDto) -> Self {
        Self {
            id: UserId::new(dto.id),
            username: dto.username,
            score: dto.score,
            rank: dto.rank,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestDto {
    pub id: u64,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(deserialize_with = "string_or_number")]
    pub prize_pool: String,
}

impl TryFrom<ContestDto> for WeeklyContest {
    type Error = GatewayError;

    fn try_from(dto: ContestDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            title: dto.title,
            starts_at: parse_timestamp(&dto.start_time)?,
            ends_at: parse_timestamp(&dto.end_time)?,
            prize_pool: dto.prize_pool,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    #[serde(default)]
    pub total_quizzes: u32,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub highest_score: u32,
    #[serde(default)]
    pub quizzes_taken: Vec<AttemptDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptDto {
    pub quiz_title: String,
    pub score: u32,
    #[serde(default)]
    pub date: String,
}

impl From<StatsDto> for UserStats {
    fn from(dto: StatsDto) -> Self {
        Self {
            total_quizzes: dto.total_quizzes,
            average_score: dto.average_score,
            highest_score: dto.highest_score,
            attempts: dto
                .quizzes_taken
                .into_iter()
                .map(|a| QuizAttempt {
                    quiz_title: a.quiz_title,
                    score: a.score,
                    date: a.date,
                })
                .collect(),
        }
    }
}

/// Accepts RFC 3339 timestamps and the zone-less `LocalDateTime` form
/// (treated as UTC).
///
/// # Errors
///
/// Returns `GatewayError::Decode` if neither form matches.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, GatewayError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| decode(format!("timestamp {raw:?}: {e}")))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Parses the submit endpoint's raw integer body.
///
/// # Errors
///
/// Returns `GatewayError::Decode` for anything but a non-negative integer.
pub fn parse_score(body: &str) -> Result<u32, GatewayError> {
    body.trim().parse::<u32>().map_err(decode)
}
