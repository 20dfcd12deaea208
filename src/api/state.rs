//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::calculation::{SequenceSource, UuidSequenceSource};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded tables and the sequence source used by NSS generation.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// Source of NSS sequence digits.
    sequence: Arc<Mutex<Box<dyn SequenceSource>>>,
}

impl AppState {
    /// Creates a new application state drawing random sequence digits.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_sequence_source(config, UuidSequenceSource)
    }

    /// Creates a new application state with an explicit sequence source.
    pub fn with_sequence_source(
        config: ConfigLoader,
        source: impl SequenceSource + 'static,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sequence: Arc::new(Mutex::new(Box::new(source))),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Locks the sequence source.
    pub fn sequence(&self) -> MutexGuard<'_, Box<dyn SequenceSource>> {
        // a panic while drawing a digit leaves the source usable
        self.sequence
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
