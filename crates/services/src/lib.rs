#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod quiz_sessions;
pub mod session_store;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use auth::AuthService;
pub use catalog::{CatalogService, Listing, ListingSource};
pub use config::ClientConfig;
pub use error::{AppServicesError, AuthError, ConfigError, GatewayError, SessionStoreError};
pub use gateway::{HttpBackend, LoginReply, QuizBackend, RegisterReply, TokenProvider};
pub use quiz_sessions::QuizSessionService;
pub use session_store::SessionStore;
