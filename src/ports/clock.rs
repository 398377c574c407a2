//! Clock port.
//!
//! Every time-dependent rule reads time from here so tests and
//! simulations can move it.

use crate::domain::foundation::Timestamp;

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
