// [apps/control-plane/src/handlers/subscriptions.rs]
//! Subscription management (`spec.md` §6: `/subscriptions/*`). Every
//! handler enforces ownership via `CallerIdentity` before delegating to
//! `services::subscription_engine`.

use crate::errors::EngineError;
use crate::middleware::CallerIdentity;
use crate::services::subscription_engine::{self, CreateOptions, UpgradeOptions};
use crate::state::AppState;
use axum::extract::{Extension, Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub plan_id: String,
    #[serde(default)]
    pub skip_credit_check: bool,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(request): Json<CreateRequest>,
) -> Result<Json<Value>, EngineError> {
    let subscription = subscription_engine::create(
        &state,
        &caller.user_id,
        &request.plan_id,
        CreateOptions {
            skip_credit_check: request.skip_credit_check && caller.is_admin,
            coupon_code: request.coupon_code,
        },
    )
    .await?;
    Ok(Json(json!({ "subscription": subscription })))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    Ok(Json(json!({ "subscription": subscription })))
}

#[derive(Debug, Deserialize)]
pub struct UpgradeRequest {
    pub new_plan_id: String,
    #[serde(default)]
    pub skip_credit_check: bool,
    #[serde(default)]
    pub allow_downgrade: bool,
}

pub async fn upgrade(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
    Json(request): Json<UpgradeRequest>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }

    let subscription = subscription_engine::upgrade(
        &state,
        &subscription_id,
        &request.new_plan_id,
        UpgradeOptions {
            skip_credit_check: request.skip_credit_check && caller.is_admin,
            allow_downgrade: request.allow_downgrade && caller.is_admin,
        },
    )
    .await?;
    Ok(Json(json!({ "subscription": subscription })))
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn cancel(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
    Json(request): Json<CancelRequest>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    subscription_engine::cancel(&state, &subscription_id, request.reason.as_deref()).await?;
    Ok(Json(json!({ "cancelled": true })))
}

pub async fn retry_provisioning(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    subscription_engine::retry_provisioning(&state, &subscription_id).await?;
    Ok(Json(json!({ "retrying": true })))
}

#[derive(Debug, Deserialize)]
pub struct AutoRenewRequest {
    pub auto_renew: bool,
}

pub async fn set_auto_renew(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
    Json(request): Json<AutoRenewRequest>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    let subscription = subscription_engine::toggle_auto_renew(&state, &subscription_id, request.auto_renew).await?;
    Ok(Json(json!({ "subscription": subscription })))
}

pub async fn stop(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    subscription_engine::stop(&state, &subscription_id).await?;
    Ok(Json(json!({ "stopping": true })))
}

pub async fn start(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    subscription_engine::start(&state, &subscription_id).await?;
    Ok(Json(json!({ "starting": true })))
}

pub async fn restart(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    subscription_engine::restart(&state, &subscription_id).await?;
    Ok(Json(json!({ "restarting": true })))
}

pub async fn billing_info(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let subscription = state.subscriptions.find_by_id(&subscription_id).await?;
    if !caller.owns_or_admin(&subscription.user_id) {
        return Err(EngineError::Forbidden);
    }
    let plan = state.catalog.find_plan(&subscription.plan_id).await?;
    Ok(Json(json!({
        "plan_id": plan.id,
        "price": plan.price,
        "next_billing_at": subscription.next_billing_at,
        "auto_renew": subscription.auto_renew,
    })))
}
