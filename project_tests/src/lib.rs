//! # Integration Test Support
//!
//! Deterministic stand-ins for the USNO service, shared by the tests in
//! `tests/`:
//!
//! - **`ScriptedFeed`**: an in-process `FeedSource` answering from a table,
//!   with optional per-path delays and a request log.
//! - **`serve`**: a local axum server, so the real `UsnoClient` can be
//!   exercised without the network.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;
use lib_skycal::sources::FeedError;
use lib_skycal::sources::FeedSource;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// A scripted answer.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 2xx with this JSON body.
    Json(Value),
    /// Non-2xx with an optional raw body.
    Status(u16, Option<String>),
}

/// # Scripted Feed
///
/// Unknown paths answer 404.
#[derive(Debug, Default)]
pub struct ScriptedFeed {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFeed {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `path` with `body`.
    pub fn json(mut self, path: impl Into<String>, body: Value) -> Self {
        self.replies.insert(path.into(), Reply::Json(body));
        self
    }

    /// Answers `path` with an HTTP error.
    pub fn status(mut self, path: impl Into<String>, status: u16, body: Option<&str>) -> Self {
        self.replies
            .insert(path.into(), Reply::Status(status, body.map(str::to_string)));
        self
    }

    /// Holds the answer to `path` back by `delay`.
    pub fn delayed(mut self, path: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(path.into(), delay);
        self
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl FeedSource for ScriptedFeed {
    async fn get_json(&self, path: &str) -> Result<Value, FeedError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(path.to_string());
        }
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        match self.replies.get(path) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Status(status, body)) => Err(FeedError::Http {
                status: *status,
                body: body.clone(),
            }),
            None => Err(FeedError::Http { status: 404, body: None }),
        }
    }
}

type Routes = Arc<HashMap<String, (u16, String)>>;

/// Starts an HTTP server on a free local port and returns its API root
/// (`http://127.0.0.1:PORT/api/`). Routes are keyed by the path below that
/// root, query included, and map to `(status, body)`.
pub async fn serve(routes: HashMap<String, (u16, String)>) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().fallback(answer).with_state(Arc::new(routes));

    tokio::spawn(async move { axum::serve(listener, app).await });

    Ok(format!("http://{}/api/", addr))
}

async fn answer(State(routes): State<Routes>, uri: Uri) -> impl IntoResponse {
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let path = target.strip_prefix("/api/").unwrap_or(target);
    let (status, body) = routes
        .get(path)
        .cloned()
        .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
