use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{
    AnswerRecord, AuthToken, Credentials, LeaderboardEntry, Question, QuizId, QuizSummary,
    Registration, UserId, UserStats, WeeklyContest,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{
    self, ContestDto, LeaderboardDto, LoginRequest, MessageDto, QuestionDto, QuizDto,
    ResponseDto, SignupRequest, StatsDto, UserDto,
};
use super::{LoginReply, QuizBackend, RegisterReply, TokenProvider};
use crate::error::GatewayError;

const LOGIN_REJECTED: &str = "Verification failed. Please check your credentials.";
const SIGNUP_REJECTED: &str = "Signup failed. This email or username might be taken.";

/// `QuizBackend` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns `GatewayError::Unreachable` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: None,
        })
    }

    /// Attaches `Authorization: Bearer` headers from `tokens` to every call.
    #[must_use]
    pub fn with_token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.as_ref().and_then(|t| t.bearer_token()) {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self.authorized(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Posts `body` without a bearer token and returns status plus raw text.
    async fn post_auth<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, String), GatewayError> {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }
}

/// Message to show for a refused auth request.
fn rejection(text: &str, fallback: &str) -> GatewayError {
    let message = match serde_json::from_str::<MessageDto>(text) {
        Ok(dto) => dto.message,
        Err(_) => Some(text.trim().to_string()),
    };
    GatewayError::Rejected {
        message: message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    }
}

#[async_trait]
impl QuizBackend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, GatewayError> {
        let body = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let (status, text) = self.post_auth("/auth/login", &body).await?;
        if !status.is_success() {
            return Err(rejection(&text, LOGIN_REJECTED));
        }
        if let Ok(dto) = serde_json::from_str::<UserDto>(&text) {
            let token = dto.token.clone().and_then(|t| AuthToken::new(t).ok());
            return Ok(LoginReply::Profile {
                user: dto.into_user(),
                token,
            });
        }
        if text.contains("successful") || text.contains("Welcome") {
            return Ok(LoginReply::Accepted {
                message: text.trim().to_string(),
            });
        }
        Err(rejection(&text, LOGIN_REJECTED))
    }

    async fn register(&self, registration: &Registration) -> Result<RegisterReply, GatewayError> {
        let body = SignupRequest {
            username: registration.username(),
            email: registration.email(),
            password: registration.password(),
        };
        let (status, text) = self.post_auth("/auth/signup", &body).await?;
        if !status.is_success() {
            return Err(rejection(&text, SIGNUP_REJECTED));
        }
        match serde_json::from_str::<UserDto>(&text) {
            Ok(dto) => Ok(RegisterReply::Profile(dto.into_user())),
            Err(_) => Ok(RegisterReply::Accepted {
                message: text.trim().to_string(),
            }),
        }
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, GatewayError> {
        let quizzes: Vec<QuizDto> = self.get_json("/quiz/all").await?;
        Ok(quizzes.into_iter().map(QuizSummary::from).collect())
    }

    async fn load_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, GatewayError> {
        let questions: Vec<QuestionDto> = self.get_json(&format!("/quiz/get/{quiz_id}")).await?;
        questions.into_iter().map(Question::try_from).collect()
    }

    async fn submit_answers(
        &self,
        quiz_id: QuizId,
        answers: &[AnswerRecord],
    ) -> Result<u32, GatewayError> {
        let url = self.url(&format!("/quiz/submit/{quiz_id}"));
        debug!("POST {url} ({} answers)", answers.len());
        let body: Vec<ResponseDto<'_>> = answers.iter().map(ResponseDto::from).collect();
        let response = self
            .authorized(self.client.post(url))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status().as_u16()));
        }
        wire::parse_score(&response.text().await?)
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        let entries: Vec<LeaderboardDto> = self.get_json("/leaderboard").await?;
        Ok(entries.into_iter().map(LeaderboardEntry::from).collect())
    }

    async fn weekly_contests(&self) -> Result<Vec<WeeklyContest>, GatewayError> {
        let contests: Vec<ContestDto> = self.get_json("/weekly-contests/active").await?;
        contests.into_iter().map(WeeklyContest::try_from).collect()
    }

    async fn user_stats(&self, user_id: UserId) -> Result<UserStats, GatewayError> {
        let stats: StatsDto = self.get_json(&format!("/user/stats/{user_id}")).await?;
        Ok(stats.into())
    }
}
