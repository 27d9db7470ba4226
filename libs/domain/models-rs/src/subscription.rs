// [libs/domain/models-rs/src/subscription.rs]
//! Subscription lifecycle state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// `PendingPayment -> Active -> {PendingUpgrade -> Active, Suspended ->
/// {Active, Expired}, Cancelled, Expired}`. `InvalidTransition` (see
/// `EngineError`) is raised for any edge not in this set.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionStatus {
    PendingPayment,
    Active,
    PendingUpgrade,
    Cancelled,
    Expired,
    Suspended,
}

/// One user's standing purchase of a `ServicePlan`. Invariant A: a user may
/// hold at most one non-terminal (`Active`/`PendingUpgrade`/`Suspended`)
/// subscription per `service_id`. Invariant B: `next_billing_at` is always
/// set while `status` is `Active` or `PendingUpgrade`.
///
/// `monthly_price` and `last_charge_amount` snapshot what was actually
/// charged at the time of the last billing event, independent of the
/// plan's live catalog price, so a later repricing of the plan can never
/// retroactively change a past charge or refund computation.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub service_id: String,
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub auto_renew: bool,
    pub started_at: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub next_billing_at: Option<DateTime<Utc>>,
    pub monthly_price: i64,
    pub last_charge_amount: i64,
    pub grace_period_end: Option<DateTime<Utc>>,
    pub previous_plan_id: Option<String>,
    pub upgrade_date: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
}

impl Subscription {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Cancelled | SubscriptionStatus::Expired
        )
    }

    pub fn is_billable(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Active | SubscriptionStatus::PendingUpgrade
        )
    }
}
