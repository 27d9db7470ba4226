// [apps/control-plane/src/handlers/admin.rs]
//! Administrative surface (`spec.md` §6: `/admin/*`). `routes.rs` is
//! responsible for gating every route under this module behind
//! `caller.is_admin`; handlers here re-check defensively since the engine
//! calls are destructive.

use crate::errors::EngineError;
use crate::middleware::CallerIdentity;
use crate::services::admin_ops;
use crate::state::AppState;
use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

fn require_admin(caller: &CallerIdentity) -> Result<(), EngineError> {
    if caller.is_admin {
        Ok(())
    } else {
        Err(EngineError::Forbidden)
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Query(page): Query<PageParams>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    let users = state.users.list_all(page.limit, page.offset).await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    let user = state.users.find_by_id(&user_id).await?;
    Ok(Json(json!({ "user": user })))
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

pub async fn set_user_active(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<String>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    state.users.set_active(&user_id, request.active).await?;
    Ok(Json(json!({ "active": request.active })))
}

#[derive(Debug, Deserialize)]
pub struct AdjustCreditRequest {
    pub user_id: String,
    pub signed_delta: i64,
    pub reason: String,
    #[serde(default)]
    pub force: bool,
}

pub async fn adjust_credit(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(request): Json<AdjustCreditRequest>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    let transaction = admin_ops::adjust_credit(
        &state,
        &caller.user_id,
        &request.user_id,
        request.signed_delta,
        &request.reason,
        request.force,
    )
    .await?;
    Ok(Json(json!({ "transaction": transaction })))
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuotaRequest {
    pub new_total: i64,
}

pub async fn adjust_quota(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(plan_id): Path<String>,
    Json(request): Json<AdjustQuotaRequest>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    admin_ops::adjust_quota(&state, &caller.user_id, &plan_id, request.new_total).await?;
    Ok(Json(json!({ "adjusted": true })))
}

#[derive(Debug, Deserialize)]
pub struct ForceCancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub process_refund: bool,
}

pub async fn force_cancel_subscription(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
    Json(request): Json<ForceCancelRequest>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    let subscription = admin_ops::force_cancel_subscription(
        &state,
        &caller.user_id,
        &subscription_id,
        request.reason.as_deref(),
        request.process_refund,
    )
    .await?;
    Ok(Json(json!({ "subscription": subscription })))
}

pub async fn force_expire_subscription(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    admin_ops::force_expire(&state, &caller.user_id, &subscription_id).await?;
    Ok(Json(json!({ "expired": true })))
}

pub async fn get_wallet(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    let balance = state.wallet.balance_of(&user_id).await?;
    let history = state.wallet.history_for(&user_id, 100).await?;
    Ok(Json(json!({ "balance": balance, "transactions": history })))
}

pub async fn list_subscriptions_for_user(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    require_admin(&caller)?;
    let subscriptions = state.subscriptions.list_by_user(&user_id).await?;
    Ok(Json(json!({ "subscriptions": subscriptions })))
}
