// [apps/control-plane/src/services/billing_scheduler.rs]
//! Billing scheduler (C8). One periodic daemon runs four named jobs per
//! tick, each processing subscriptions in `next_billing_at`/`grace_period_end`
//! order so a single user is never billed twice within one tick.

use crate::services::provisioner::ProvisionTask;
use crate::state::AppState;
use chrono::{Duration, Utc};
use gridkeep_domain_billing::is_low_credit;
use gridkeep_domain_models::TransactionType;
use std::time::Duration as StdDuration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, instrument, warn};

const TICK_PERIOD: StdDuration = StdDuration::from_secs(60 * 60);
const LOW_CREDIT_HORIZON_DAYS: i64 = 7;

pub fn spawn(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = interval(TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("billing scheduler online");
        loop {
            ticker.tick().await;
            run_tick(&state).await;
        }
    });
}

#[instrument(skip(state))]
async fn run_tick(state: &AppState) {
    daily_renewals(state).await;
    grace_period(state).await;
    low_credit_notifications(state).await;
    grace_period_reminders(state).await;
}

/// For every `Active`, auto-renewing subscription due for renewal: attempt
/// to deduct the snapshotted `monthly_price`. On `InsufficientCredit` the
/// subscription stays `Active` and opens a `gracePeriodEnd` window
/// (`spec.md` §4.8 `daily-renewals`) rather than suspending immediately;
/// `grace_period` is the job that acts once that window closes unpaid.
async fn daily_renewals(state: &AppState) {
    let now = Utc::now();
    let due = match state.subscriptions.due_for_billing(now).await {
        Ok(due) => due,
        Err(error) => {
            warn!(%error, "daily-renewals: could not list due subscriptions");
            return;
        }
    };

    for subscription in due {
        let charge = state
            .wallet
            .apply_ledger_entry(&subscription.user_id, TransactionType::Charge, -subscription.monthly_price, Some("auto-renewal"))
            .await;

        match charge {
            Ok(_) => {
                let new_end_date = now + Duration::days(30);
                if let Err(error) = state.subscriptions.renew(&subscription.id, new_end_date, subscription.monthly_price).await {
                    warn!(subscription_id = %subscription.id, %error, "daily-renewals: could not advance billing date");
                    continue;
                }
                info!(subscription_id = %subscription.id, "renewal charged");
            }
            Err(gridkeep_infra_db::DbError::InsufficientCredit) => {
                let grace_period_end = now + Duration::days(state.config.grace_period_days);
                if state.subscriptions.enter_grace(&subscription.id, grace_period_end).await.is_ok() {
                    warn!(
                        subscription_id = %subscription.id,
                        grace_period_end = %grace_period_end,
                        "renewal failed: insufficient credit, entering grace period"
                    );
                }
            }
            Err(error) => {
                warn!(subscription_id = %subscription.id, %error, "renewal skipped: transient failure");
            }
        }
    }
}

/// Two-phase job (`spec.md` §4.8 `grace-period`):
///
/// 1. Subscriptions whose grace window closed are given one more charge
///    attempt (the owner may have topped up since `daily_renewals` opened
///    the window); if it still fails they move `Active -> Suspended`, the
///    instance is stopped, and the plan's quota slot is released here, at
///    the transition that actually frees it, not later at expiry.
/// 2. Subscriptions already `Suspended` past the further expiry window
///    move `Suspended -> Expired` and have their instance terminated. No
///    second quota release: the slot was already freed in phase 1.
async fn grace_period(state: &AppState) {
    let now = Utc::now();

    let grace_expired = match state.subscriptions.grace_period_expired(now).await {
        Ok(subscriptions) => subscriptions,
        Err(error) => {
            warn!(%error, "grace-period: could not list expired grace windows");
            return;
        }
    };

    for subscription in grace_expired {
        let charge = state
            .wallet
            .apply_ledger_entry(&subscription.user_id, TransactionType::Charge, -subscription.monthly_price, Some("grace-period retry"))
            .await;

        if charge.is_ok() {
            let new_end_date = now + Duration::days(30);
            state.subscriptions.renew(&subscription.id, new_end_date, subscription.monthly_price).await.ok();
            info!(subscription_id = %subscription.id, "grace-period retry charge succeeded");
            continue;
        }

        if state.subscriptions.suspend(&subscription.id).await.is_err() {
            continue;
        }
        state.catalog.release_quota(&subscription.plan_id, 1).await.ok();
        if let Ok(Some(instance)) = state.instances.find_by_subscription(&subscription.id).await {
            state.provisioner_tx.send(ProvisionTask::Stop { instance_id: instance.id }).await.ok();
        }
        warn!(subscription_id = %subscription.id, "subscription suspended: grace period exhausted");
    }

    let cutoff = now - Duration::days(state.config.suspension_to_expiry_days);
    let stale = match state.subscriptions.suspended_past_grace(cutoff).await {
        Ok(stale) => stale,
        Err(error) => {
            warn!(%error, "grace-period: could not list stale suspensions");
            return;
        }
    };

    for subscription in stale {
        if let Err(error) = state.subscriptions.expire(&subscription.id).await {
            warn!(subscription_id = %subscription.id, %error, "grace-period: expire transition rejected");
            continue;
        }
        if let Ok(Some(instance)) = state.instances.find_by_subscription(&subscription.id).await {
            state.provisioner_tx.send(ProvisionTask::Terminate { instance_id: instance.id }).await.ok();
        }
        warn!(subscription_id = %subscription.id, "subscription expired after suspension");
    }
}

/// `Active` subscriptions renewing within `LOW_CREDIT_HORIZON_DAYS` whose
/// owner cannot cover the charge get a logged low-credit warning
/// (notification delivery is an external integration, out of scope).
async fn low_credit_notifications(state: &AppState) {
    let now = Utc::now();
    let horizon = now + Duration::days(LOW_CREDIT_HORIZON_DAYS);
    let upcoming = match state.subscriptions.due_within(now, horizon).await {
        Ok(upcoming) => upcoming,
        Err(error) => {
            warn!(%error, "low-credit-notifications: could not list upcoming renewals");
            return;
        }
    };

    for subscription in upcoming {
        let (user, plan) = match (
            state.users.find_by_id(&subscription.user_id).await,
            state.catalog.find_plan(&subscription.plan_id).await,
        ) {
            (Ok(user), Ok(plan)) => (user, plan),
            _ => continue,
        };
        if is_low_credit(&user, &plan) {
            warn!(
                subscription_id = %subscription.id,
                user_id = %subscription.user_id,
                balance = user.credit_balance,
                price = subscription.monthly_price,
                "low credit balance ahead of renewal"
            );
        }
    }
}

/// Daily reminder for subscriptions still inside an open grace window with
/// an unresolved balance (`spec.md` §4.8 `grace-period-reminders`).
async fn grace_period_reminders(state: &AppState) {
    let now = Utc::now();
    let in_grace = match state.subscriptions.in_grace_period(now).await {
        Ok(in_grace) => in_grace,
        Err(error) => {
            warn!(%error, "grace-period-reminders: could not list subscriptions in grace");
            return;
        }
    };

    for subscription in in_grace {
        let user = match state.users.find_by_id(&subscription.user_id).await {
            Ok(user) => user,
            Err(_) => continue,
        };
        if user.credit_balance < subscription.monthly_price {
            info!(subscription_id = %subscription.id, "grace period reminder issued");
        }
    }
}
