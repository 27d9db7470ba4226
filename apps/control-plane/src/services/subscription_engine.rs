// [apps/control-plane/src/services/subscription_engine.rs]
//! Subscription engine (C7). Every mutation here either fully commits its
//! wallet/quota/subscription rows or leaves no trace; the provisioning step
//! is always scheduled after commit, never inside the transaction that
//! changed ledger state.

use crate::errors::EngineError;
use crate::services::coupon_resolver;
use crate::services::provisioner::ProvisionTask;
use crate::state::AppState;
use chrono::{Duration, Utc};
use gridkeep_domain_billing::{check_credit, prorated_upgrade_cost, CreditCheck, ProrationInput};
use gridkeep_domain_catalog::is_change_allowed;
use gridkeep_domain_provisioning::generate_subdomain;
use gridkeep_domain_models::{Subscription, SubscriptionStatus, TransactionType};
use tracing::{info, instrument};

const BILLING_CYCLE_DAYS: i64 = 30;

#[derive(Debug, Default, Clone)]
pub struct CreateOptions {
    pub skip_credit_check: bool,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UpgradeOptions {
    pub skip_credit_check: bool,
    pub allow_downgrade: bool,
}

/// `spec.md` §4.7 `create`. In this schema credit is charged synchronously
/// from the wallet (no external payment gateway step), so `create_pending`
/// is immediately followed by `activate` rather than waiting on a webhook.
#[instrument(skip(state))]
pub async fn create(
    state: &AppState,
    user_id: &str,
    plan_id: &str,
    options: CreateOptions,
) -> Result<Subscription, EngineError> {
    let user = state.users.find_by_id(user_id).await?;
    let plan = state.catalog.find_plan(plan_id).await?;
    let service = state.catalog.find_service(&plan.service_id).await?;

    let coupon = match &options.coupon_code {
        Some(code) => Some(coupon_resolver::validate(state, code).await?),
        None => None,
    };
    let charge_amount = match &coupon {
        Some(coupon) => coupon_resolver::discounted_charge(coupon, plan.price),
        None => plan.price,
    };

    if !options.skip_credit_check {
        if let CreditCheck::Insufficient { .. } = check_credit(&user, charge_amount) {
            return Err(EngineError::InsufficientCredit);
        }
    }

    state.catalog.reserve_quota(plan_id, 1).await?;

    let deduction = state
        .wallet
        .apply_ledger_entry(user_id, TransactionType::Charge, -charge_amount, Some("subscription create"))
        .await;
    let deduction = match deduction {
        Ok(transaction) => transaction,
        Err(error) => {
            state.catalog.release_quota(plan_id, 1).await.ok();
            return Err(error.into());
        }
    };

    let subscription = state
        .subscriptions
        .create_pending(user_id, &plan.service_id, plan_id)
        .await?;
    let now = Utc::now();
    let end_date = now + Duration::days(BILLING_CYCLE_DAYS);
    state.subscriptions.activate(&subscription.id, end_date, plan.price, charge_amount).await?;
    let subscription = state.subscriptions.find_by_id(&subscription.id).await?;

    let namespace = format!("user-{}", user_id);
    let subdomain = generate_subdomain(&service.slug, user_id, now, &state.config.zone);
    let ssl_enabled = true;
    let public_url = format!("{}://{}", if ssl_enabled { "https" } else { "http" }, subdomain);
    let instance = state
        .instances
        .create_pending(&subscription.id, user_id, &namespace, &subdomain, &public_url, ssl_enabled)
        .await?;

    if let Some(code) = &options.coupon_code {
        coupon_resolver::record_subscription_discount(state, code, user_id).await.ok();
    }

    info!(
        subscription_id = %subscription.id,
        charge_amount,
        balance_after = deduction.balance_after,
        "subscription created"
    );

    state
        .provisioner_tx
        .send(ProvisionTask::Provision { instance_id: instance.id })
        .await
        .ok();

    Ok(subscription)
}

/// `spec.md` §4.7 `upgrade`. Proration uses the current billing cycle,
/// approximated as `[end_date - 30d, end_date)` since this schema does not
/// carry a separate cycle-start column. `upgradeCost` may be negative for a
/// downgrade; a negative cost is refunded rather than charged.
#[instrument(skip(state))]
pub async fn upgrade(
    state: &AppState,
    subscription_id: &str,
    new_plan_id: &str,
    options: UpgradeOptions,
) -> Result<Subscription, EngineError> {
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;
    if subscription.status != SubscriptionStatus::Active {
        return Err(EngineError::InvalidTransition);
    }

    let old_plan = state.catalog.find_plan(&subscription.plan_id).await?;
    let new_plan = state.catalog.find_plan(new_plan_id).await?;
    if old_plan.service_id != new_plan.service_id {
        return Err(EngineError::BadRequest("plan belongs to a different service".into()));
    }
    if !is_change_allowed(&old_plan, &new_plan, options.allow_downgrade) {
        return Err(EngineError::InvalidTransition);
    }

    let now = Utc::now();
    let cycle_end = subscription.end_date.unwrap_or(now + Duration::days(BILLING_CYCLE_DAYS));
    let cycle_started_at = cycle_end - Duration::days(BILLING_CYCLE_DAYS);
    let upgrade_cost = prorated_upgrade_cost(&ProrationInput {
        current_price: old_plan.price,
        new_price: new_plan.price,
        cycle_started_at,
        next_billing_at: cycle_end,
        now,
    });

    let user = state.users.find_by_id(&subscription.user_id).await?;
    if upgrade_cost > 0 && !options.skip_credit_check {
        if let CreditCheck::Insufficient { .. } = check_credit(&user, upgrade_cost) {
            return Err(EngineError::InsufficientCredit);
        }
    }

    if upgrade_cost > 0 {
        state
            .wallet
            .apply_ledger_entry(&subscription.user_id, TransactionType::Charge, -upgrade_cost, Some("subscription upgrade"))
            .await?;
    } else if upgrade_cost < 0 {
        state
            .wallet
            .apply_ledger_entry(&subscription.user_id, TransactionType::Refund, -upgrade_cost, Some("subscription downgrade credit"))
            .await?;
    } else {
        state
            .wallet
            .apply_ledger_entry(&subscription.user_id, TransactionType::Charge, 0, Some("subscription upgrade (no charge)"))
            .await?;
    }

    state.catalog.release_quota(&old_plan.id, 1).await?;
    state.catalog.reserve_quota(&new_plan.id, 1).await?;

    state
        .subscriptions
        .upgrade(subscription_id, new_plan_id, &old_plan.id, now, new_plan.price, upgrade_cost.max(0))
        .await?;
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;

    if let Some(instance) = state.instances.find_by_subscription(subscription_id).await? {
        state
            .provisioner_tx
            .send(ProvisionTask::Update { instance_id: instance.id, plan_id: new_plan.id })
            .await
            .ok();
    }

    Ok(subscription)
}

/// `spec.md` §4.7 `cancel`. No refund; the remaining paid-for days are
/// forfeit. Quota is released immediately since the user is giving up the
/// slot on their own initiative, unlike the billing-driven grace/suspend
/// path where release happens at the ACTIVE -> SUSPENDED transition.
#[instrument(skip(state))]
pub async fn cancel(state: &AppState, subscription_id: &str, reason: Option<&str>) -> Result<(), EngineError> {
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;
    state.subscriptions.cancel(subscription_id, reason).await?;
    state.catalog.release_quota(&subscription.plan_id, 1).await.ok();
    terminate_instance(state, subscription_id).await;
    Ok(())
}

/// `spec.md` §4.7 `forceCancel` [admin]. Optionally refunds the prorated
/// remainder of the current cycle, computed off the snapshotted
/// `monthly_price` the subscription was actually billed at rather than the
/// plan's live catalog price, so a later repricing can't change the
/// refund.
#[instrument(skip(state))]
pub async fn force_cancel(
    state: &AppState,
    subscription_id: &str,
    reason: Option<&str>,
    process_refund: bool,
) -> Result<(), EngineError> {
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;

    if process_refund {
        if let Some(end_date) = subscription.end_date {
            let cycle_started_at = end_date - Duration::days(BILLING_CYCLE_DAYS);
            let remaining_seconds = (end_date - Utc::now()).num_seconds().max(0);
            let cycle_seconds = (end_date - cycle_started_at).num_seconds().max(1);
            let refund = (subscription.monthly_price as i128 * remaining_seconds as i128 / cycle_seconds as i128) as i64;
            if refund > 0 {
                state
                    .wallet
                    .apply_ledger_entry(&subscription.user_id, TransactionType::Refund, refund, Some("admin force-cancel refund"))
                    .await?;
            }
        }
    }

    state.subscriptions.force_cancel(subscription_id, reason).await?;
    state.catalog.release_quota(&subscription.plan_id, 1).await.ok();
    terminate_instance(state, subscription_id).await;
    Ok(())
}

/// `spec.md` §4.7 `retryProvisioning`. Refuses when the instance is
/// `Running` (nothing to retry) or `Provisioning` (already in progress).
#[instrument(skip(state))]
pub async fn retry_provisioning(state: &AppState, subscription_id: &str) -> Result<(), EngineError> {
    let instance = state
        .instances
        .find_by_subscription(subscription_id)
        .await?
        .ok_or(EngineError::NotFound)?;

    use gridkeep_domain_models::InstanceStatus::*;
    match instance.status {
        Running | Provisioning => return Err(EngineError::InvalidTransition),
        _ => {}
    }

    state.instances.mark_provisioning(&instance.id).await.ok();
    state
        .provisioner_tx
        .send(ProvisionTask::Provision { instance_id: instance.id })
        .await
        .ok();
    Ok(())
}

/// `spec.md` §4.7 `toggleAutoRenew`. Re-enabling from `Cancelled` while
/// still within the paid-for period transitions back to `Active`.
#[instrument(skip(state))]
pub async fn toggle_auto_renew(
    state: &AppState,
    subscription_id: &str,
    auto_renew: bool,
) -> Result<Subscription, EngineError> {
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;
    if !matches!(subscription.status, SubscriptionStatus::Active | SubscriptionStatus::Cancelled) {
        return Err(EngineError::InvalidTransition);
    }

    state.subscriptions.set_auto_renew(subscription_id, auto_renew).await?;

    if auto_renew
        && subscription.status == SubscriptionStatus::Cancelled
        && subscription.end_date.map(|at| at > Utc::now()).unwrap_or(false)
    {
        state.subscriptions.reactivate_from_cancellation(subscription_id).await.ok();
    }

    state.subscriptions.find_by_id(subscription_id).await.map_err(Into::into)
}

#[instrument(skip(state))]
pub async fn stop(state: &AppState, subscription_id: &str) -> Result<(), EngineError> {
    let instance = instance_for(state, subscription_id).await?;
    state.provisioner_tx.send(ProvisionTask::Stop { instance_id: instance.id }).await.ok();
    Ok(())
}

#[instrument(skip(state))]
pub async fn start(state: &AppState, subscription_id: &str) -> Result<(), EngineError> {
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;
    let instance = instance_for(state, subscription_id).await?;
    state
        .provisioner_tx
        .send(ProvisionTask::Start { instance_id: instance.id, plan_id: subscription.plan_id })
        .await
        .ok();
    Ok(())
}

#[instrument(skip(state))]
pub async fn restart(state: &AppState, subscription_id: &str) -> Result<(), EngineError> {
    let instance = instance_for(state, subscription_id).await?;
    state.provisioner_tx.send(ProvisionTask::Restart { instance_id: instance.id }).await.ok();
    Ok(())
}

async fn instance_for(state: &AppState, subscription_id: &str) -> Result<gridkeep_domain_models::ServiceInstance, EngineError> {
    state
        .instances
        .find_by_subscription(subscription_id)
        .await?
        .ok_or(EngineError::NotFound)
}

async fn terminate_instance(state: &AppState, subscription_id: &str) {
    if let Ok(Some(instance)) = state.instances.find_by_subscription(subscription_id).await {
        state
            .provisioner_tx
            .send(ProvisionTask::Terminate { instance_id: instance.id })
            .await
            .ok();
    }
}
