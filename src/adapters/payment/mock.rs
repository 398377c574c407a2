//! Mock payment gateway for testing.
//!
//! Supports:
//! - Error injection per method, or per subscription for `cancel`
//! - Call tracking for ordering assertions

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::PlanType;
use crate::ports::{PaymentError, PaymentGateway};

/// Recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Authorize {
        subscription_id: SubscriptionId,
        user_id: UserId,
        plan: PlanType,
    },
    Cancel {
        subscription_id: SubscriptionId,
    },
}

#[derive(Default)]
struct MockState {
    /// Errors returned by every call to the named method.
    method_errors: HashMap<&'static str, PaymentError>,
    /// Subscriptions whose cancellation fails.
    failing_cancels: HashSet<SubscriptionId>,
    call_log: Vec<GatewayCall>,
}

/// In-process `PaymentGateway` that accepts everything unless told otherwise.
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Every `authorize` call fails with `error`.
    pub fn fail_authorize(&self, error: PaymentError) {
        self.state().method_errors.insert("authorize", error);
    }

    /// Every `cancel` call fails with `error`.
    pub fn fail_cancel(&self, error: PaymentError) {
        self.state().method_errors.insert("cancel", error);
    }

    /// Only cancellation of `id` fails.
    pub fn fail_cancel_for(&self, id: SubscriptionId) {
        self.state().failing_cancels.insert(id);
    }

    /// Remove all injected failures.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.method_errors.clear();
        state.failing_cancels.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state().call_log.clone()
    }

    pub fn authorize_count(&self) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| matches!(c, GatewayCall::Authorize { .. }))
            .count()
    }

    pub fn cancelled_ids(&self) -> Vec<SubscriptionId> {
        self.state()
            .call_log
            .iter()
            .filter_map(|c| match c {
                GatewayCall::Cancel { subscription_id } => Some(*subscription_id),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn authorize(
        &self,
        subscription_id: &SubscriptionId,
        user_id: &UserId,
        plan: PlanType,
    ) -> Result<(), PaymentError> {
        let mut state = self.state();
        state.call_log.push(GatewayCall::Authorize {
            subscription_id: *subscription_id,
            user_id: user_id.clone(),
            plan,
        });
        match state.method_errors.get("authorize") {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn cancel(&self, subscription_id: &SubscriptionId) -> Result<(), PaymentError> {
        let mut state = self.state();
        state.call_log.push(GatewayCall::Cancel {
            subscription_id: *subscription_id,
        });
        if let Some(err) = state.method_errors.get("cancel") {
            return Err(err.clone());
        }
        if state.failing_cancels.contains(subscription_id) {
            return Err(PaymentError::provider(format!(
                "Simulated cancel failure for {}",
                subscription_id
            )));
        }
        Ok(())
    }
}
