//! Configuration handling for the extractor and its binaries.
//!
//! Everything the pipeline needs to talk to Wikipedia (endpoints, the
//! User-Agent, timeouts, the output bound) lives here and is handed to the
//! orchestrators at construction. `Config::from_env` reads overrides from the
//! environment and falls back to defaults that point at English Wikipedia.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use url::Url;

/// Environment variable names.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_API_URL: &str = "WIKI_API_URL";
pub const ENV_REST_URL: &str = "WIKI_REST_URL";
pub const ENV_USER_AGENT: &str = "WIKI_USER_AGENT";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "WIKI_REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_CONTENT_LENGTH: &str = "WIKI_MAX_CONTENT_LENGTH";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_REST_URL: &str = "https://en.wikipedia.org/api/rest_v1";
const DEFAULT_USER_AGENT: &str = "WikiExtract/0.1 (study notes extractor; educational project)";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 10_000;

/// Runtime configuration shared by the library and the binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    api_url: Url,
    rest_url: Url,
    user_agent: String,
    request_timeout: Duration,
    max_content_length: usize,
}

impl Config {
    /// Config pointing at explicit endpoints, with default limits.
    ///
    /// Tests use this to aim the pipeline at a mock server.
    pub fn new(api_url: Url, rest_url: Url) -> Self {
        Self {
            api_url,
            rest_url,
            ..Self::default()
        }
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr);
        let api_url = match env::var(ENV_API_URL) {
            Ok(raw) => parse_url("api_url", &raw)?,
            Err(_) => defaults.api_url,
        };
        let rest_url = match env::var(ENV_REST_URL) {
            Ok(raw) => parse_url("rest_url", &raw)?,
            Err(_) => defaults.rest_url,
        };
        let user_agent = env::var(ENV_USER_AGENT).unwrap_or(defaults.user_agent);
        if user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user_agent",
                reason: "must not be empty".to_string(),
            });
        }
        let request_timeout = match env::var(ENV_REQUEST_TIMEOUT_SECS) {
            Ok(raw) => Duration::from_secs(parse_positive("request_timeout", &raw)? as u64),
            Err(_) => defaults.request_timeout,
        };
        let max_content_length = match env::var(ENV_MAX_CONTENT_LENGTH) {
            Ok(raw) => parse_positive("max_content_length", &raw)?,
            Err(_) => defaults.max_content_length,
        };

        Ok(Self {
            bind_addr,
            api_url,
            rest_url,
            user_agent,
            request_timeout,
            max_content_length,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_content_length(mut self, max: usize) -> Self {
        self.max_content_length = max;
        self
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// MediaWiki action API endpoint (`.../w/api.php`).
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
    /// REST API base (`.../api/rest_v1`).
    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }
    /// User-Agent sent with every upstream request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
    /// Upper bound, in characters, of any extracted document.
    pub fn max_content_length(&self) -> usize {
        self.max_content_length
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            rest_url: Url::parse(DEFAULT_REST_URL).expect("default rest url is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

fn parse_positive(field: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
