use super::test_harness::{HarnessOptions, ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_catalog() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, HarnessOptions::default()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, ada"), "missing greeting in {html}");
    assert!(html.contains("Rust Ownership"), "missing quiz card in {html}");
    assert!(html.contains("12 Questions"), "missing question count in {html}");
    assert!(html.contains("Frameworks"), "missing category option in {html}");
    assert!(html.contains("Borrow Checker Cup"), "missing contest banner in {html}");
    assert!(html.contains("Set reminder"), "missing reminder toggle in {html}");
    assert!(!html.contains("offline data"), "unexpected offline notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_marks_fallback_data() {
    let mut harness = setup_view_harness(
        ViewKind::Dashboard,
        HarnessOptions {
            online: false,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Showing offline data"), "missing notice in {html}");
    assert!(html.contains("Java Fundamentals"), "missing placeholder quiz in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_error_without_fallback() {
    let mut harness = setup_view_harness(
        ViewKind::Dashboard,
        HarnessOptions {
            online: false,
            offline_fallback: false,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Unable to reach the quiz server."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_formats_scores() {
    let mut harness = setup_view_harness(ViewKind::Leaderboard, HarnessOptions::default()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("ferris"), "missing username in {html}");
    assert!(html.contains("12,500"), "missing formatted score in {html}");
    assert!(html.contains("podium rank-1"), "missing podium styling in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_empty_history() {
    let mut harness = setup_view_harness(ViewKind::Profile, HarnessOptions::default()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("ada@example.com"), "missing email in {html}");
    assert!(html.contains("0.0"), "missing average in {html}");
    assert!(html.contains("No quizzes taken yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_room_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz(7), HarnessOptions::default()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("30:00"), "missing timer in {html}");
    assert!(html.contains("What is item 1?"), "missing prompt in {html}");
    assert!(html.contains("Gamma"), "missing option in {html}");
    assert!(html.contains("Not Visited (2)"), "missing legend count in {html}");
    assert!(html.contains("Mark for Review"), "missing mark button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_room_view_smoke_renders_no_content() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz(7),
        HarnessOptions {
            questions: Vec::new(),
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No questions available"), "missing message in {html}");
    assert!(html.contains("Back to Dashboard"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score() {
    let mut harness = setup_view_harness(ViewKind::Results(8), HarnessOptions::default()).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Quiz Completed!"), "missing title in {html}");
    assert!(html.contains(">8<"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(
        ViewKind::Login,
        HarnessOptions {
            signed_in: false,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("login-email"), "missing email field in {html}");
    assert!(html.contains("Register"), "missing register link in {html}");
    assert!(!html.contains("error-panel"), "unexpected error panel in {html}");
}
