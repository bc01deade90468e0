//! # Load Tracker
//!
//! Year loads are tagged with a generation number. Starting a new load
//! supersedes every older one; only the answer carrying the latest tag may
//! replace the displayed events.

use tracing::debug;

/// Handle of one in-flight year load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// Monotonic load number.
    pub generation: u64,
    /// Year being loaded.
    pub year: i32,
}

/// Issues tickets and judges which answers are still wanted.
#[derive(Debug, Default)]
pub struct LoadTracker {
    generation: u64,
}

impl LoadTracker {
    /// A tracker with no load started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load for `year`, superseding any earlier one.
    pub fn begin(&mut self, year: i32) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            year,
        }
    }

    /// True when `ticket` belongs to the most recent load.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Like `is_current`, logging the answers that get discarded.
    pub fn accept(&self, ticket: &LoadTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!(
                year = ticket.year,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale year load"
            );
        }
        current
    }
}
