//! Gateway and backend configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BACKEND_PORT: u16 = 8000;

pub const TOKEN_VAR: &str = "FORM_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration: env var {var} not set")]
    Missing { var: String },

    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: String, value: String },
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

/// Where the form service lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeouts: Timeouts,
}

impl GatewayConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_token: api_token.into(),
            timeouts: Timeouts::default(),
        }
    }

    /// Build gateway config from environment variables.
    ///
    /// Required:
    /// - `FORM_API_TOKEN`: credential sent in the `Authorization` header
    ///
    /// Optional:
    /// - `FORM_API_BASE_URL`: default `http://localhost:8000`
    /// - `FORM_API_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FORM_API_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the token is absent and
    /// [`ConfigError::Invalid`] when a timeout is not an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = required_var(TOKEN_VAR)?;
        let base_url = std::env::var("FORM_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeouts = Timeouts {
            request_secs: env_parse("FORM_API_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse("FORM_API_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { base_url: normalize_base_url(&base_url), api_token, timeouts })
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

/// Settings for the bundled in-memory form service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub port: u16,
    pub api_token: String,
}

impl BackendConfig {
    /// Build backend config from `FORM_API_TOKEN` and `FORM_BACKEND_PORT`
    /// (default 8000).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the token is absent or the port is not a
    /// valid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: env_parse("FORM_BACKEND_PORT", DEFAULT_BACKEND_PORT)?,
            api_token: required_var(TOKEN_VAR)?,
        })
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing { var: var.into() }),
    }
}

fn env_parse<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(var) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| ConfigError::Invalid { var: var.into(), value })
        }
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
