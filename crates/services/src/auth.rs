use std::sync::Arc;

use quiz_core::model::{AuthToken, Credentials, Identity, Registration, User, UserId};
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::{info, warn};

use crate::Clock;
use crate::error::{AuthError, GatewayError};
use crate::gateway::{LoginReply, QuizBackend, RegisterReply};
use crate::session_store::SessionStore;

const LOGIN_UNREACHABLE: &str =
    "The quiz server is currently unreachable. Please ensure the backend is active.";
const SIGNUP_UNREACHABLE: &str = "The signup service is temporarily offline.";
const TOKEN_LEN: usize = 24;

/// Sign-in, sign-up and sign-out.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    backend: Arc<dyn QuizBackend>,
    store: Arc<SessionStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn QuizBackend>, store: Arc<SessionStore>) -> Self {
        Self {
            clock,
            backend,
            store,
        }
    }

    /// Signs in and stores the resulting identity.
    ///
    /// When the backend only confirms the login without a profile, the user
    /// is named after the email's local part and a local session token is
    /// generated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for malformed input, `AuthError::Unreachable`
    /// when the backend cannot be contacted, and `AuthError::Rejected` when the
    /// credentials are refused.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let credentials = Credentials::new(email, password)?;
        let reply = self
            .backend
            .login(&credentials)
            .await
            .map_err(|e| map_gateway(e, LOGIN_UNREACHABLE))?;

        let identity = match reply {
            LoginReply::Profile { user, token } => Identity {
                user,
                token: match token {
                    Some(token) => token,
                    None => generate_token()?,
                },
            },
            LoginReply::Accepted { message } => {
                info!("login confirmed without profile: {message}");
                Identity {
                    user: User {
                        id: UserId::new(self.clock.now_millis()),
                        username: credentials.email_local_part().to_string(),
                        email: credentials.email().to_string(),
                    },
                    token: generate_token()?,
                }
            }
        };

        self.store.set(identity.clone()).await?;
        info!("signed in as {}", identity.user.username);
        Ok(identity)
    }

    /// Creates an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for malformed input, `AuthError::Unreachable`
    /// when the backend cannot be contacted, and `AuthError::Rejected` when the
    /// account cannot be created.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let registration = Registration::new(username, email, password)?;
        let reply = self
            .backend
            .register(&registration)
            .await
            .map_err(|e| map_gateway(e, SIGNUP_UNREACHABLE))?;

        let user = match reply {
            RegisterReply::Profile(user) => user,
            RegisterReply::Accepted { .. } => User {
                id: UserId::new(self.clock.now_millis()),
                username: registration.username().to_string(),
                email: registration.email().to_string(),
            },
        };
        info!("registered {}", user.username);
        Ok(user)
    }

    /// Signs out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the saved identity cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Some(identity) = self.store.current() {
            info!("signing out {}", identity.user.username);
        }
        self.store.clear().await?;
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.store.current()
    }
}

fn map_gateway(err: GatewayError, unreachable: &str) -> AuthError {
    match err {
        GatewayError::Unreachable(reason) => {
            warn!("auth request failed: {reason}");
            AuthError::Unreachable(unreachable.to_string())
        }
        GatewayError::Rejected { message } => AuthError::Rejected(message),
        other => AuthError::Gateway(other),
    }
}

fn generate_token() -> Result<AuthToken, AuthError> {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect();
    Ok(AuthToken::new(format!("session-{suffix}"))?)
}
