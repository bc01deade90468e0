//! # Feed Access
//!
//! `FeedSource` is the only thing adapters know about the network: give it a
//! path relative to the API root, get JSON back. `UsnoClient` is the real
//! implementation; tests substitute canned feeds.

use crate::retrieve::{ApiClient, RetrieveError};
use crate::sources::settings::SourceSettings;
use chrono::NaiveDate;
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

/// Why a feed contributed nothing.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Source unreachable: URL, connection, timeout or body decoding.
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status}")]
    Http {
        /// Status code.
        status: u16,
        /// Raw body, when one was sent.
        body: Option<String>,
    },

    /// A 2xx answer without a body.
    #[error("empty response body")]
    EmptyBody,

    /// The JSON does not match the feed's schema.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A required top-level field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A record names a day that does not exist.
    #[error("invalid date {year}-{month}-{day}")]
    InvalidDate {
        /// Record year.
        year: i32,
        /// Record month.
        month: u32,
        /// Record day.
        day: u32,
    },
}

/// Read-only access to JSON feeds addressed by relative path.
pub trait FeedSource: Send + Sync {
    /// Fetches `path` (query included) and returns the decoded JSON body.
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, FeedError>> + Send;
}

/// Converts a feed record's numeric date into a calendar date.
pub(crate) fn record_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, FeedError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(FeedError::InvalidDate { year, month, day })
}

/// # USNO Client
///
/// `FeedSource` over the U.S. Naval Observatory Astronomical Applications API.
/// One instance (and one connection pool) serves every adapter.
#[derive(Clone)]
pub struct UsnoClient {
    client: ApiClient,
}

impl UsnoClient {
    /// Builds the client from source settings.
    pub fn new(settings: &SourceSettings) -> Result<Self, FeedError> {
        let client = ApiClient::new(&settings.base_url, &settings.client_options())?;
        Ok(Self { client })
    }
}

impl FeedSource for UsnoClient {
    async fn get_json(&self, path: &str) -> Result<Value, FeedError> {
        let response = self.client.get::<Value>(path).await?;

        if response.success {
            response.data.ok_or(FeedError::EmptyBody)
        } else {
            Err(FeedError::Http {
                status: response.status,
                body: response.error_body,
            })
        }
    }
}
