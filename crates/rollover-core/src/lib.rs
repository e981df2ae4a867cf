//! rollover-core
//!
//! Period rollover engine: budget windows, recurring occurrences, catch-up and
//! status queries. Depends on rollover-domain. No terminal I/O, no direct
//! storage backends.

pub mod budget_rollover;
pub mod catch_up;
pub mod error;
pub mod recurrence;
pub mod rollover_service;
pub mod status;
pub mod storage;
pub mod time;

pub use budget_rollover::*;
pub use catch_up::*;
pub use error::CoreError;
pub use recurrence::*;
pub use rollover_service::*;
pub use status::*;
pub use storage::*;
pub use time::*;

#[cfg(test)]
mod tests;
