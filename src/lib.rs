//! Rollover Engine computes budget period rollovers, recurring transaction
//! occurrences and the catch-up of stale documents for a personal finance
//! tracker. This crate wires the engine crates to configuration, logging and
//! the system clock.

pub mod clock;
pub mod engine;
pub mod errors;
pub mod utils;

pub use rollover_config::{Config, ConfigManager};
pub use rollover_core;
pub use rollover_domain;

pub use clock::SystemClock;
pub use engine::{calendar_from_config, open_service};
pub use errors::{EngineError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Rollover engine tracing initialized.");
    });
}
