//! # HTTP Retrieval Utilities
//!
//! An asynchronous API client wrapper around `reqwest` with middleware support
//! for exponential backoff retries and standardized JSON response handling.

use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Failures below the HTTP status level.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The base URL or a joined path is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The underlying `reqwest::Client` could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout or middleware failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// A 2xx body that is not valid JSON for the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// A standardized container for API responses.
///
/// Wraps the deserialized data along with the HTTP status. A non-2xx status
/// is not an error at this level: the caller decides what it means.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The successfully deserialized response body, if any.
    pub data: Option<T>,
    /// The raw body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
}

/// Transport settings for an `ApiClient`.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Transient-failure retries. `0` disables retrying.
    pub max_retries: u32,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 0,
            user_agent: concat!("skycal/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A flexible asynchronous HTTP client.
///
/// Built on top of `reqwest_middleware`, it handles base URLs, timeouts and
/// automatic retries of transient failures.
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// `base_url` must be absolute. A trailing slash is added when missing so
    /// that relative paths extend the base instead of replacing its last segment.
    pub fn new(base_url: &str, options: &ClientOptions) -> Result<Self, RetrieveError> {
        let url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(options.max_retries);

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(RetrieveError::Build)?;

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            inner: client,
            base_url: url,
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins a relative path (query string included) onto the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, RetrieveError> {
        Ok(self.base_url.join(path)?)
    }

    /// Performs a GET request and deserializes a 2xx body into `T`.
    ///
    /// Non-2xx responses come back with `success: false` and the raw body in
    /// `error_body`.
    pub async fn get<T>(&self, path: &str) -> Result<ApiResponse<T>, RetrieveError>
    where
        T: DeserializeOwned,
    {
        let full_url = self.endpoint(path)?;

        let response: reqwest::Response = self.inner.get(full_url).send().await?;
        let status = response.status();

        if status.is_success() {
            let data = response.json::<T>().await.map_err(RetrieveError::Decode)?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
            })
        } else {
            // Keep the body: some feeds explain the failure in JSON.
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
            })
        }
    }
}
