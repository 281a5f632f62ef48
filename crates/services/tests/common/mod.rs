#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quiz_core::model::{
    AnswerRecord, Credentials, LeaderboardEntry, Question, QuestionId, QuizId, QuizSummary,
    Registration, UserId, UserStats, WeeklyContest,
};
use services::{GatewayError, LoginReply, QuizBackend, RegisterReply};

/// Scriptable in-process backend.
pub struct FakeBackend {
    pub questions: Result<Vec<Question>, GatewayError>,
    pub score: Result<u32, GatewayError>,
    pub login: Result<LoginReply, GatewayError>,
    pub register: Result<RegisterReply, GatewayError>,
    pub listings_fail: bool,
    pub submit_calls: AtomicUsize,
    pub last_submission: Mutex<Vec<AnswerRecord>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            questions: Ok(questions(3)),
            score: Ok(1),
            login: Ok(LoginReply::Accepted {
                message: "Login successful".into(),
            }),
            register: Ok(RegisterReply::Accepted {
                message: "User registered".into(),
            }),
            listings_fail: false,
            submit_calls: AtomicUsize::new(0),
            last_submission: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn submits(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    fn listing<T>(&self, items: T) -> Result<T, GatewayError> {
        if self.listings_fail {
            Err(GatewayError::Unreachable("connection refused".into()))
        } else {
            Ok(items)
        }
    }
}

pub fn questions(count: u64) -> Vec<Question> {
    (1..=count)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("Question {id}"),
                ["A".into(), "B".into(), "C".into(), "D".into()],
            )
            .unwrap()
        })
        .collect()
}

#[async_trait]
impl QuizBackend for FakeBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginReply, GatewayError> {
        self.login.clone()
    }

    async fn register(&self, _registration: &Registration) -> Result<RegisterReply, GatewayError> {
        self.register.clone()
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, GatewayError> {
        self.listing(vec![QuizSummary {
            id: QuizId::new(9),
            title: "Rust Ownership".into(),
            category: "Programming".into(),
            question_count: 3,
        }])
    }

    async fn load_questions(&self, _quiz_id: QuizId) -> Result<Vec<Question>, GatewayError> {
        self.questions.clone()
    }

    async fn submit_answers(
        &self,
        _quiz_id: QuizId,
        answers: &[AnswerRecord],
    ) -> Result<u32, GatewayError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_submission.lock().unwrap() = answers.to_vec();
        self.score.clone()
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        self.listing(Vec::new())
    }

    async fn weekly_contests(&self) -> Result<Vec<WeeklyContest>, GatewayError> {
        self.listing(Vec::new())
    }

    async fn user_stats(&self, _user_id: UserId) -> Result<UserStats, GatewayError> {
        self.listing(UserStats::default())
    }
}
