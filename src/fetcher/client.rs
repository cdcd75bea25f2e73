use std::time::Duration;

use reqwest::{Client, ClientBuilder, header};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::fetcher::errors::FetchError;

const MAX_REDIRECTS: usize = 10;

/// HTTP client shared by every extraction strategy.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: Client,
    timeout: Duration,
}

impl WikiClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.9"),
        );

        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET a JSON document. `query` pairs are appended to the URL.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .query(query)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest_error(e, self.timeout))?;
        debug!("received {} bytes of json", body.len());

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// GET an HTML page, aborting the whole exchange once `limit` elapses.
    ///
    /// The bound covers both the response head and the body download. An
    /// elapsed bound surfaces as [`FetchError::Timeout`].
    #[instrument(skip_all, fields(url = %url, limit_ms = limit.as_millis() as u64))]
    pub async fn get_html(&self, url: &str, limit: Duration) -> Result<String, FetchError> {
        let parsed_url = Url::parse(url)?;

        let exchange = async {
            let response = self
                .http
                .get(parsed_url)
                .header(
                    header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header(header::CACHE_CONTROL, "no-store")
                .send()
                .await
                .map_err(|e| FetchError::from_reqwest_error(e, limit))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Http { status });
            }

            response
                .text()
                .await
                .map_err(|e| FetchError::from_reqwest_error(e, limit))
        };

        // Dropping the future on elapse cancels the in-flight request.
        match tokio::time::timeout(limit, exchange).await {
            Ok(result) => {
                let body = result?;
                debug!("received {} bytes of html", body.len());
                Ok(body)
            }
            Err(_) => Err(FetchError::Timeout(limit)),
        }
    }
}
