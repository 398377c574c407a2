//! Outcome of one expiry sweep.

use serde::Serialize;

use crate::domain::foundation::SubscriptionId;

/// Step of a sweep item that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepStage {
    /// Local status could not be set to Expired.
    StatusUpdate,
    /// Status was updated but the provider-side cancellation failed.
    ProviderCancel,
}

/// A single item that did not complete cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepFailure {
    pub subscription_id: SubscriptionId,
    pub stage: SweepStage,
    pub reason: String,
}

/// Counts and failures for one sweep run.
///
/// `expired` counts local status transitions, so an item that expired
/// locally but failed provider cancellation shows up in both `expired`
/// and `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub examined: usize,
    pub expired: usize,
    pub failures: Vec<SweepFailure>,
}

impl SweepSummary {
    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub fn record_failure(
        &mut self,
        subscription_id: SubscriptionId,
        stage: SweepStage,
        reason: impl Into<String>,
    ) {
        self.failures.push(SweepFailure {
            subscription_id,
            stage,
            reason: reason.into(),
        });
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True if nothing was due.
    pub fn is_noop(&self) -> bool {
        self.examined == 0
    }
}
