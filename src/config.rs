//! Service configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_DELAY_MS: u64 = 1000;
pub const DEFAULT_AUTH_BACKEND_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TRANSCRIPTION_DELAY_MS: u64 = 2000;
pub const PLACEHOLDER_HERE_API_KEY: &str = "YOUR_HERE_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Artificial latency of the demo backend.
    pub auth_delay: Duration,
    /// Remote auth service. The demo credential table is used when absent.
    pub auth_backend_url: Option<String>,
    pub auth_backend_timeout: Duration,
    pub cookie_secure: bool,
    pub here_api_key: String,
    /// Simulated speech-to-text processing time for voice complaints.
    pub transcription_delay: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// - `PORT`: default 3000
    /// - `AUTH_DELAY_MS`: default 1000
    /// - `AUTH_BACKEND_URL`: optional remote auth service
    /// - `AUTH_BACKEND_TIMEOUT_SECS`: default 10
    /// - `COOKIE_SECURE`: default false
    /// - `HERE_API_KEY`: placeholder key when absent
    /// - `TRANSCRIPTION_DELAY_MS`: default 2000
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT)?,
            auth_delay: Duration::from_millis(env_parse("AUTH_DELAY_MS", DEFAULT_AUTH_DELAY_MS)?),
            auth_backend_url: std::env::var("AUTH_BACKEND_URL")
                .ok()
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty()),
            auth_backend_timeout: Duration::from_secs(env_parse(
                "AUTH_BACKEND_TIMEOUT_SECS",
                DEFAULT_AUTH_BACKEND_TIMEOUT_SECS,
            )?),
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
            here_api_key: std::env::var("HERE_API_KEY").unwrap_or_else(|_| PLACEHOLDER_HERE_API_KEY.to_owned()),
            transcription_delay: Duration::from_millis(env_parse(
                "TRANSCRIPTION_DELAY_MS",
                DEFAULT_TRANSCRIPTION_DELAY_MS,
            )?),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auth_delay: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            auth_backend_url: None,
            auth_backend_timeout: Duration::from_secs(DEFAULT_AUTH_BACKEND_TIMEOUT_SECS),
            cookie_secure: false,
            here_api_key: PLACEHOLDER_HERE_API_KEY.to_owned(),
            transcription_delay: Duration::from_millis(DEFAULT_TRANSCRIPTION_DELAY_MS),
        }
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Boolean env var. Unset or unrecognized values yield `None`.
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().and_then(|raw| parse_bool(&raw))
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
