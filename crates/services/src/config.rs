use std::time::Duration;

use quiz_core::session::TimeBudget;
use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "https://quizapp-backend.onrender.com";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://quiz-client.sqlite3";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ENV_BACKEND_URL: &str = "QUIZ_BACKEND_URL";
pub const ENV_DATABASE_URL: &str = "QUIZ_DB_URL";
pub const ENV_TIME_LIMIT_SECS: &str = "QUIZ_TIME_LIMIT_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "QUIZ_REQUEST_TIMEOUT_SECS";
pub const ENV_OFFLINE_FALLBACK: &str = "QUIZ_OFFLINE_FALLBACK";

/// Runtime settings for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub database_url: String,
    pub time_budget: TimeBudget,
    pub request_timeout: Duration,
    /// Serve placeholder listings when the backend cannot be reached.
    pub offline_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            time_budget: TimeBudget::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            offline_fallback: true,
        }
    }
}

impl ClientConfig {
    /// Reads settings from the process environment, falling back to defaults
    /// for unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BACKEND_URL) {
            config.backend_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(url) = get(ENV_DATABASE_URL) {
            config.database_url = url.trim().to_string();
        }
        if let Some(raw) = get(ENV_TIME_LIMIT_SECS) {
            let secs = parse_u32(ENV_TIME_LIMIT_SECS, &raw)?;
            config.time_budget = TimeBudget::from_secs(secs)?;
        }
        if let Some(raw) = get(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: ENV_REQUEST_TIMEOUT_SECS,
                expected: "a number of seconds",
                value: raw.clone(),
            })?;
            if secs == 0 {
                warn!("{ENV_REQUEST_TIMEOUT_SECS} is 0. Defaulting to {DEFAULT_REQUEST_TIMEOUT_SECS}");
            } else {
                config.request_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(raw) = get(ENV_OFFLINE_FALLBACK) {
            config.offline_fallback = parse_flag(ENV_OFFLINE_FALLBACK, &raw)?;
        }

        Ok(config)
    }
}

fn parse_u32(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
        var,
        expected: "a number of seconds",
        value: raw.to_string(),
    })
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "a boolean",
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use quiz_core::session::{DEFAULT_TIME_BUDGET_SECS, SessionError};

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.time_budget.secs(), DEFAULT_TIME_BUDGET_SECS);
        assert!(config.offline_fallback);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BACKEND_URL, "http://localhost:8081/"),
            (ENV_TIME_LIMIT_SECS, "60"),
            (ENV_REQUEST_TIMEOUT_SECS, "3"),
            (ENV_OFFLINE_FALLBACK, "off"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "http://localhost:8081");
        assert_eq!(config.time_budget.secs(), 60);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(!config.offline_fallback);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err =
            ClientConfig::from_lookup(lookup(&[(ENV_TIME_LIMIT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_TIME_LIMIT_SECS, .. }));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIME_LIMIT_SECS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Session(SessionError::ZeroTimeBudget));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_OFFLINE_FALLBACK, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
