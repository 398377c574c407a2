//! Subscription domain module.
//!
//! Owns the subscription entity, its status state machine, and the
//! report produced by an expiry sweep.
//!
//! # Module Structure
//!
//! - `aggregate` - Subscription entity and time-window rule
//! - `status` - SubscriptionStatus state machine
//! - `plan` - PlanType billing plans
//! - `errors` - SubscriptionError
//! - `sweep` - SweepSummary for batch expiry runs

mod aggregate;
mod errors;
mod plan;
mod status;
mod sweep;

pub use aggregate::Subscription;
pub use errors::SubscriptionError;
pub use plan::PlanType;
pub use status::SubscriptionStatus;
pub use sweep::{SweepFailure, SweepStage, SweepSummary};
