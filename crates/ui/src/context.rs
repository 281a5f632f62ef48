use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::Identity;
use services::{AuthService, CatalogService, QuizSessionService, SessionStore};

pub trait UiApp: Send + Sync {
    fn session_store(&self) -> Arc<SessionStore>;
    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn quiz_sessions(&self) -> Arc<QuizSessionService>;
}

#[derive(Clone)]
pub struct AppContext {
    session_store: Arc<SessionStore>,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    quiz_sessions: Arc<QuizSessionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session_store: app.session_store(),
            auth: app.auth(),
            catalog: app.catalog(),
            quiz_sessions: app.quiz_sessions(),
        }
    }

    #[must_use]
    pub fn session_store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session_store)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_sessions)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Reactive copy of the signed-in identity, seeded from the session store.
#[derive(Clone, Copy, PartialEq)]
pub struct CurrentUser(pub Signal<Option<Identity>>);

impl CurrentUser {
    #[must_use]
    pub fn get(&self) -> Option<Identity> {
        self.0.read().clone()
    }

    pub fn set(&mut self, identity: Option<Identity>) {
        self.0.set(identity);
    }
}

/// Provides `CurrentUser` for the subtree, seeded once from the store.
pub fn use_current_user_provider() -> CurrentUser {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| CurrentUser(Signal::new(ctx.session_store().current())))
}

#[must_use]
pub fn use_current_user() -> CurrentUser {
    use_context::<CurrentUser>()
}
