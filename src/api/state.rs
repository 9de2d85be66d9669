//! Application state for the compensation engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::TimeClockLedger;

/// Shared application state.
///
/// Holds the loaded configuration, which is read-only after startup, and the
/// time-clock ledger, which is the only mutable component.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// Punches and derived work records.
    ledger: Arc<TimeClockLedger>,
}

impl AppState {
    /// Creates a new application state with an empty ledger using the
    /// configured day-boundary offset.
    pub fn new(config: ConfigLoader) -> Self {
        let ledger = TimeClockLedger::new(config.offset());
        Self {
            config: Arc::new(config),
            ledger: Arc::new(ledger),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the time-clock ledger.
    pub fn ledger(&self) -> &TimeClockLedger {
        &self.ledger
    }
}
