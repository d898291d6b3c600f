//! Board client configuration parsed from environment variables.

pub const DEFAULT_API_URL: &str = "https://api.sugina.cc";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid BOARD_API_URL '{0}': expected an http:// or https:// URL")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub api_url: String,
    pub session_cookie: Option<String>,
    pub timeouts: Timeouts,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned(), session_cookie: None, timeouts: Timeouts::default() }
    }
}

impl BoardConfig {
    /// Build typed board config from environment variables.
    ///
    /// Optional:
    /// - `BOARD_API_URL`: default `https://api.sugina.cc`
    /// - `BOARD_SESSION_COOKIE`: sent as the `Cookie` header when present
    /// - `BOARD_REQUEST_TIMEOUT_SECS`: default 30 (also used for `0`)
    /// - `BOARD_CONNECT_TIMEOUT_SECS`: default 10 (also used for `0`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if `BOARD_API_URL` is not an
    /// http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("BOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let session_cookie = std::env::var("BOARD_SESSION_COOKIE").ok().filter(|c| !c.trim().is_empty());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("BOARD_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("BOARD_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self { api_url: String::new(), session_cookie, timeouts }.with_api_url(&api_url)
    }

    /// Replace the API base URL, validating and normalizing it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] for anything other than an
    /// http(s) URL.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(raw)?;
        Ok(self)
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidApiUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

/// Zero is treated as unset: a zero timeout would fail every request.
fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
