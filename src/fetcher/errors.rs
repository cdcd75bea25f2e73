use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("api error: {0}")]
    Api(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Classify a reqwest error. `timeout` is the bound the request ran under,
    /// reported back when the error is a timeout.
    pub fn from_reqwest_error(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
