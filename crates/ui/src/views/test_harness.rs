use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{
    AnswerRecord, AuthToken, Credentials, Identity, LeaderboardEntry, Question, QuestionId,
    QuizId, QuizSummary, Registration, User, UserId, UserStats, WeeklyContest,
};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{
    AppServices, AuthService, CatalogService, ClientConfig, GatewayError, LoginReply,
    QuizBackend, QuizSessionService, RegisterReply, SessionStore,
};
use storage::repository::InMemoryRepository;

use crate::context::{UiApp, build_app_context, use_current_user_provider};
use crate::views::{
    DashboardView, LeaderboardView, LoginView, ProfileView, QuizRoomView, ResultsView,
};

/// Backend whose listings either succeed with canned data or are unreachable.
pub struct StubBackend {
    pub online: bool,
    pub questions: Vec<Question>,
}

impl StubBackend {
    fn check(&self) -> Result<(), GatewayError> {
        if self.online {
            Ok(())
        } else {
            Err(GatewayError::Unreachable("connection refused".into()))
        }
    }
}

pub fn sample_questions(count: u64) -> Vec<Question> {
    (1..=count)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("What is item {id}?"),
                ["Alpha".into(), "Beta".into(), "Gamma".into(), "Delta".into()],
            )
            .expect("valid question")
        })
        .collect()
}

#[async_trait]
impl QuizBackend for StubBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginReply, GatewayError> {
        self.check()?;
        Ok(LoginReply::Accepted {
            message: "Login successful".into(),
        })
    }

    async fn register(&self, _registration: &Registration) -> Result<RegisterReply, GatewayError> {
        self.check()?;
        Ok(RegisterReply::Accepted {
            message: "User registered".into(),
        })
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, GatewayError> {
        self.check()?;
        Ok(vec![
            QuizSummary {
                id: QuizId::new(7),
                title: "Rust Ownership".into(),
                category: "Programming".into(),
                question_count: 12,
            },
            QuizSummary {
                id: QuizId::new(8),
                title: "Axum Routing".into(),
                category: "Frameworks".into(),
                question_count: 5,
            },
        ])
    }

    async fn load_questions(&self, _quiz_id: QuizId) -> Result<Vec<Question>, GatewayError> {
        self.check()?;
        Ok(self.questions.clone())
    }

    async fn submit_answers(
        &self,
        _quiz_id: QuizId,
        answers: &[AnswerRecord],
    ) -> Result<u32, GatewayError> {
        self.check()?;
        Ok(u32::try_from(answers.len()).unwrap_or(u32::MAX))
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        self.check()?;
        Ok(vec![LeaderboardEntry {
            id: UserId::new(1),
            username: "ferris".into(),
            score: 12_500,
            rank: 1,
        }])
    }

    async fn weekly_contests(&self) -> Result<Vec<WeeklyContest>, GatewayError> {
        self.check()?;
        Ok(vec![WeeklyContest {
            id: 3,
            title: "Borrow Checker Cup".into(),
            starts_at: fixed_now(),
            ends_at: fixed_now(),
            prize_pool: "750".into(),
        }])
    }

    async fn user_stats(&self, _user_id: UserId) -> Result<UserStats, GatewayError> {
        self.check()?;
        Ok(UserStats::default())
    }
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session_store(&self) -> Arc<SessionStore> {
        self.services.session_store()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        self.services.quiz_sessions()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Leaderboard,
    Profile,
    Login,
    Results(u32),
    Quiz(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_current_user_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Results(score) => rsx! { ResultsView { score } },
        ViewKind::Quiz(quiz_id) => rsx! { QuizRoomView { quiz_id } },
    }
}

pub struct HarnessOptions {
    pub online: bool,
    pub offline_fallback: bool,
    pub signed_in: bool,
    pub questions: Vec<Question>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            online: true,
            offline_fallback: true,
            signed_in: true,
            questions: sample_questions(3),
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuilds and lets pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn signed_in_identity() -> Identity {
    Identity {
        user: User {
            id: UserId::new(42),
            username: "ada".into(),
            email: "ada@example.com".into(),
        },
        token: AuthToken::new("session-test").expect("token"),
    }
}

pub async fn setup_view_harness(view: ViewKind, options: HarnessOptions) -> ViewHarness {
    let clock = fixed_clock();
    let store = Arc::new(SessionStore::new(
        clock,
        Arc::new(InMemoryRepository::new()),
    ));
    if options.signed_in {
        store
            .set(signed_in_identity())
            .await
            .expect("seed identity");
    }
    let backend = Arc::new(StubBackend {
        online: options.online,
        questions: options.questions,
    });
    let config = ClientConfig {
        offline_fallback: options.offline_fallback,
        ..ClientConfig::default()
    };
    let services = AppServices::assemble(&config, clock, store, backend);

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );
    ViewHarness { dom }
}
