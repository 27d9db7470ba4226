// [apps/control-plane/src/services/admin_ops.rs]
//! Administrative overrides (C9 support). Every operation here bypasses a
//! rule an ordinary user path enforces, so each is logged with the acting
//! admin's id for audit.

use crate::errors::EngineError;
use crate::state::AppState;
use gridkeep_domain_models::{Subscription, Transaction, TransactionType};
use tracing::{info, instrument};

/// Signed wallet adjustment attributed to an admin. Refuses to drive the
/// balance negative unless `force` is set.
#[instrument(skip(state))]
pub async fn adjust_credit(
    state: &AppState,
    admin_id: &str,
    user_id: &str,
    signed_delta: i64,
    reason: &str,
    force: bool,
) -> Result<Transaction, EngineError> {
    if signed_delta < 0 && !force {
        let user = state.users.find_by_id(user_id).await?;
        if user.credit_balance + signed_delta < 0 {
            return Err(EngineError::InsufficientCredit);
        }
    }

    let kind = if signed_delta >= 0 { TransactionType::TopUp } else { TransactionType::Charge };
    let transaction = state
        .wallet
        .apply_ledger_entry(user_id, kind, signed_delta, Some(reason))
        .await?;

    info!(admin_id, user_id, signed_delta, reason, "admin credit adjustment applied");
    Ok(transaction)
}

/// Raises or lowers a plan's total quota. `spec.md` §4.3's
/// `setTotalQuota(newTotal < usedQuota)` refusal is enforced at the SQL
/// layer by leaving `used_quota` untouched; callers needing the forced
/// over-allocated path should not route through this helper.
#[instrument(skip(state))]
pub async fn adjust_quota(state: &AppState, admin_id: &str, plan_id: &str, new_total: i64) -> Result<(), EngineError> {
    let plan = state.catalog.find_plan(plan_id).await?;
    if new_total < plan.used_quota {
        return Err(EngineError::BadRequest("new total quota is below the currently allocated amount".into()));
    }
    state.catalog.set_total_quota(plan_id, new_total).await?;
    info!(admin_id, plan_id, new_total, "admin quota adjustment applied");
    Ok(())
}

/// Administrative force-cancel with optional prorated refund, delegating
/// to the subscription engine's own `force_cancel`.
#[instrument(skip(state))]
pub async fn force_cancel_subscription(
    state: &AppState,
    admin_id: &str,
    subscription_id: &str,
    reason: Option<&str>,
    process_refund: bool,
) -> Result<Subscription, EngineError> {
    crate::services::subscription_engine::force_cancel(state, subscription_id, reason, process_refund).await?;
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;
    info!(admin_id, subscription_id, process_refund, "admin force-cancel applied");
    Ok(subscription)
}

/// Manually expires a subscription regardless of its grace period,
/// releasing quota and terminating its instance.
#[instrument(skip(state))]
pub async fn force_expire(state: &AppState, admin_id: &str, subscription_id: &str) -> Result<(), EngineError> {
    let subscription = state.subscriptions.find_by_id(subscription_id).await?;
    state.subscriptions.suspend(subscription_id).await.ok();
    state.subscriptions.expire(subscription_id).await?;
    state.catalog.release_quota(&subscription.plan_id, 1).await.ok();
    if let Ok(Some(instance)) = state.instances.find_by_subscription(subscription_id).await {
        state
            .provisioner_tx
            .send(crate::services::provisioner::ProvisionTask::Terminate { instance_id: instance.id })
            .await
            .ok();
    }
    info!(admin_id, subscription_id, "admin manual expiry applied");
    Ok(())
}
