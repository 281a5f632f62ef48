use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use quiz_core::model::{
    AnswerRecord, AuthToken, Credentials, OptionSlot, QuestionId, QuizId, Registration, UserId,
};
use quiz_core::session::{SessionPhase, TimeBudget};
use serde_json::{Value, json};
use services::{
    GatewayError, HttpBackend, LoginReply, QuizBackend, QuizSessionService, RegisterReply,
    TokenProvider,
};

struct StaticToken(AuthToken);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<AuthToken> {
        Some(self.0.clone())
    }
}

async fn login(Json(body): Json<Value>) -> (StatusCode, String) {
    if body["password"] == "pw" {
        (StatusCode::OK, "Login successful".into())
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid credentials".into())
    }
}

async fn signup(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "id": 31, "username": body["username"], "email": body["email"] }))
}

async fn quizzes() -> Json<Value> {
    Json(json!([{ "id": 1, "title": "Rust Basics", "category": "Programming", "numQuestions": 2 }]))
}

async fn questions(Path(id): Path<u64>) -> Json<Value> {
    if id == 9 {
        return Json(json!([
            { "id": 91, "question_title": "Rust has a GC?", "option1": "True", "option2": "False", "option3": null, "option4": null },
            { "id": 92, "question_title": "Sized by default?", "option1": "Yes", "option2": "No", "option3": "", "option4": "" }
        ]));
    }
    Json(json!([
        { "id": id * 10 + 1, "question_title": "Which keyword moves?", "option1": "let", "option2": "move", "option3": "ref", "option4": "mut" },
        { "id": id * 10 + 2, "questionTitle": "Borrow?", "option1": "&", "option2": "*", "option3": "@", "option4": "#" }
    ]))
}

async fn submit(headers: HeaderMap, Json(body): Json<Vec<Value>>) -> (StatusCode, String) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer session-test");
    if !authorized {
        return (StatusCode::FORBIDDEN, String::new());
    }
    let correct = body.iter().filter(|r| r["response"] == "move").count();
    (StatusCode::OK, correct.to_string())
}

async fn contests() -> Json<Value> {
    Json(json!([{ "id": 5, "title": "Weekly", "startTime": "2024-03-01T10:00:00", "endTime": "2024-03-08T10:00:00", "prizePool": "250" }]))
}

async fn stats(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({
        "totalQuizzes": id,
        "averageScore": 7.5,
        "highestScore": 9,
        "quizzesTaken": [{ "quizTitle": "Rust Basics", "score": 9, "date": "2024-03-02" }]
    }))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/quiz/all", get(quizzes))
        .route("/quiz/get/{id}", get(questions))
        .route("/quiz/submit/{id}", post(submit))
        .route("/leaderboard", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/weekly-contests/active", get(contests))
        .route("/user/stats/{id}", get(stats));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn backend() -> HttpBackend {
    let url = spawn_backend().await;
    HttpBackend::new(&url, Duration::from_secs(5))
        .unwrap()
        .with_token_provider(Arc::new(StaticToken(AuthToken::new("session-test").unwrap())))
}

#[tokio::test]
async fn login_plain_text_and_rejection() {
    let backend = backend().await;

    let ok = backend
        .login(&Credentials::new("ada@example.com", "pw").unwrap())
        .await
        .unwrap();
    assert_eq!(
        ok,
        LoginReply::Accepted {
            message: "Login successful".into()
        }
    );

    let err = backend
        .login(&Credentials::new("ada@example.com", "nope").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Rejected {
            message: "Invalid credentials".into()
        }
    );
}

#[tokio::test]
async fn signup_returns_profile() {
    let backend = backend().await;
    let reply = backend
        .register(&Registration::new("ada", "ada@example.com", "pw").unwrap())
        .await
        .unwrap();
    match reply {
        RegisterReply::Profile(user) => {
            assert_eq!(user.id, UserId::new(31));
            assert_eq!(user.username, "ada");
        }
        other => panic!("unexpected reply {other:?}"),
    }
}

#[tokio::test]
async fn questions_and_submission_roundtrip() {
    let backend = backend().await;

    let questions = backend.load_questions(QuizId::new(4)).await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].id(), QuestionId::new(41));
    assert_eq!(questions[1].prompt(), "Borrow?");

    let score = backend
        .submit_answers(
            QuizId::new(4),
            &[
                AnswerRecord::new(QuestionId::new(41), "move"),
                AnswerRecord::new(QuestionId::new(42), "*"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(score, 1);
}

#[tokio::test]
async fn true_false_quiz_with_empty_slots_is_playable() {
    let svc = QuizSessionService::new(Arc::new(backend().await), TimeBudget::default());

    let mut session = svc.start(QuizId::new(9)).await;
    assert_eq!(session.phase(), SessionPhase::InProgress);
    assert_eq!(session.question_count(), 2);
    assert!(!session.select_slot(OptionSlot::C));
    assert!(session.select_slot(OptionSlot::B));
    assert_eq!(session.current_answer(), Some("False"));

    assert!(session.next());
    assert_eq!(session.current_question().unwrap().option(OptionSlot::D), "");
    assert!(session.select_answer("Yes"));
}

#[tokio::test]
async fn listings_decode_and_status_errors_surface() {
    let backend = backend().await;

    let quizzes = backend.list_quizzes().await.unwrap();
    assert_eq!(quizzes[0].question_count, 2);

    let contests = backend.weekly_contests().await.unwrap();
    assert_eq!(contests[0].prize_pool, "250");

    let stats = backend.user_stats(UserId::new(3)).await.unwrap();
    assert_eq!(stats.total_quizzes, 3);
    assert_eq!(stats.attempts[0].quiz_title, "Rust Basics");

    assert_eq!(
        backend.leaderboard().await.unwrap_err(),
        GatewayError::Status(500)
    );
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = backend.list_quizzes().await.unwrap_err();
    assert!(err.is_unreachable(), "{err:?}");
}
