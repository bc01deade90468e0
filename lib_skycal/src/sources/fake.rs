//! Canned `FeedSource` for adapter and aggregator tests.

use crate::sources::feed::{FeedError, FeedSource};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub(crate) enum Canned {
    Json(Value),
    Status(u16, Option<String>),
}

#[derive(Default)]
pub(crate) struct FakeFeed {
    responses: HashMap<String, Canned>,
    delays: HashMap<String, Duration>,
}

impl FakeFeed {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn json(mut self, path: impl Into<String>, body: Value) -> Self {
        self.responses.insert(path.into(), Canned::Json(body));
        self
    }

    pub(crate) fn status(mut self, path: impl Into<String>, status: u16, body: Option<&str>) -> Self {
        self.responses
            .insert(path.into(), Canned::Status(status, body.map(str::to_string)));
        self
    }

    pub(crate) fn delayed(mut self, path: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(path.into(), delay);
        self
    }
}

impl FeedSource for FakeFeed {
    async fn get_json(&self, path: &str) -> Result<Value, FeedError> {
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        match self.responses.get(path) {
            Some(Canned::Json(body)) => Ok(body.clone()),
            Some(Canned::Status(status, body)) => Err(FeedError::Http {
                status: *status,
                body: body.clone(),
            }),
            None => Err(FeedError::Http { status: 404, body: None }),
        }
    }
}
