use dioxus::prelude::*;
use services::{AuthError, GatewayError};

const OFFLINE_MESSAGE: &str = "Unable to reach the quiz server.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The backend could not be reached.
    Offline(String),
    /// The backend answered with a user-facing message.
    Rejected(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Offline(message) | Self::Rejected(message) => message,
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline(_))
    }
}

impl From<GatewayError> for ViewError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unreachable(_) => Self::Offline(OFFLINE_MESSAGE.to_string()),
            GatewayError::Rejected { message } => Self::Rejected(message),
            _ => Self::Unknown,
        }
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Invalid(inner) => Self::Rejected(inner.to_string()),
            AuthError::Unreachable(message) => Self::Offline(message),
            AuthError::Rejected(message) => Self::Rejected(message),
            AuthError::Gateway(inner) => inner.into(),
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
