//! # Static Event Catalog
//!
//! Pre-computed lunar eclipses, oppositions and elongations. The bundled
//! dataset is compiled into the library; operators may point at their own
//! file of the same shape instead.
//!
//! Records pass through unchanged. A year's slice is every record whose date
//! starts with `YYYY-`.

use crate::events::Event;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const BUNDLED_DATASET: &str = include_str!("../../data/astronomy_events.json");

/// Read-only access to pre-computed events.
pub trait EventRepository: Send + Sync {
    /// Every stored event of `year`, in storage order.
    fn events_for_year(&self, year: i32) -> Vec<Event>;
}

/// Why a catalog could not be built.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON is not a list of valid event records.
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// # Event Catalog
///
/// An in-memory list of events loaded once and never modified.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    /// The dataset shipped with the library.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Parses a JSON array of `{ date, title, type, description, intensity? }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        debug!(count = events.len(), "catalog loaded");
        Ok(Self { events })
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Wraps an existing list.
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Number of stored events across all years.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the catalog holds nothing.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventRepository for EventCatalog {
    fn events_for_year(&self, year: i32) -> Vec<Event> {
        let prefix = format!("{:04}-", year);
        self.events
            .iter()
            .filter(|e| e.has_prefix(&prefix))
            .cloned()
            .collect()
    }
}
