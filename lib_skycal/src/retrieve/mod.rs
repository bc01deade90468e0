//! # Data Retrieval Module
//!
//! Generic HTTP plumbing shared by every remote feed. Source adapters never
//! talk to `reqwest` directly; they go through the `ApiClient` defined here so
//! that URL joining, timeouts, the user agent and the (optional) retry
//! middleware are configured in one place.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: `ApiClient`, built on `reqwest` and `reqwest-middleware`,
//!   returning non-2xx responses as data instead of errors.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Generic HTTP API client with retry middleware.
pub mod ky_http;

pub use ky_http::{ApiClient, ApiResponse, ClientOptions, RetrieveError};
