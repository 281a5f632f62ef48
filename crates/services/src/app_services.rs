use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::auth::AuthService;
use crate::catalog::CatalogService;
use crate::config::ClientConfig;
use crate::error::AppServicesError;
use crate::gateway::{HttpBackend, QuizBackend, TokenProvider};
use crate::quiz_sessions::QuizSessionService;
use crate::session_store::SessionStore;

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    session_store: Arc<SessionStore>,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    quiz_sessions: Arc<QuizSessionService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization, session restore
    /// or HTTP client setup fails.
    pub async fn new_sqlite(config: &ClientConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.database_url).await?;
        let store = Arc::new(SessionStore::new(clock, Arc::clone(&storage.identity)));
        store.init().await?;

        let tokens: Arc<dyn TokenProvider> = store.clone();
        let backend = HttpBackend::new(&config.backend_url, config.request_timeout)?
            .with_token_provider(tokens);
        info!("using backend {}", backend.base_url());

        Ok(Self::assemble(config, clock, store, Arc::new(backend)))
    }

    /// Build services over an existing store and backend.
    #[must_use]
    pub fn assemble(
        config: &ClientConfig,
        clock: Clock,
        session_store: Arc<SessionStore>,
        backend: Arc<dyn QuizBackend>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(
            clock,
            Arc::clone(&backend),
            Arc::clone(&session_store),
        ));
        let catalog = Arc::new(CatalogService::new(
            clock,
            Arc::clone(&backend),
            config.offline_fallback,
        ));
        let quiz_sessions = Arc::new(QuizSessionService::new(backend, config.time_budget));

        Self {
            session_store,
            auth,
            catalog,
            quiz_sessions,
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
