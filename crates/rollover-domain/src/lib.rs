//! rollover-domain
//!
//! Pure domain models (Budget, PeriodWindow, RecurringSpec, Transaction) and
//! calendar arithmetic. No I/O, no logging, no storage.

pub mod budget;
pub mod calendar;
pub mod common;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::*;
pub use calendar::Calendar;
pub use common::*;
pub use period::*;
pub use recurring::*;
pub use transaction::*;
