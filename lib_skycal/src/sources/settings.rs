use crate::retrieve::ClientOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default USNO Astronomical Applications API root.
pub const USNO_BASE_URL: &str = "https://aa.usno.navy.mil/api/";

/// Fixed observer used for solar-eclipse visibility lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observer {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
    /// Metres above sea level.
    pub height: i32,
}

impl Default for Observer {
    fn default() -> Self {
        Self {
            latitude: 26.4669,
            longitude: 73.1147,
            height: 0,
        }
    }
}

/// # Source Settings
///
/// Everything the remote adapters need: where the feeds live, who observes,
/// and how patient the HTTP layer is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceSettings {
    /// API root joined with every feed path.
    pub base_url: String,
    /// Observer for the visibility lookups.
    pub observer: Observer,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Transient-failure retries; `0` keeps the single-attempt behaviour.
    pub max_retries: u32,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: USNO_BASE_URL.to_string(),
            observer: Observer::default(),
            timeout_secs: 10,
            max_retries: 0,
        }
    }
}

impl SourceSettings {
    /// Transport options for the shared `ApiClient`.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            ..ClientOptions::default()
        }
    }
}
