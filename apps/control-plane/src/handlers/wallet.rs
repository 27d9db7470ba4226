// [apps/control-plane/src/handlers/wallet.rs]
//! Wallet operations (`spec.md` §6: `/wallet/*`). Top-ups here are a
//! direct ledger credit; the real payment capture happens through
//! `handlers::webhook`.

use crate::errors::EngineError;
use crate::middleware::CallerIdentity;
use crate::state::AppState;
use axum::extract::{Extension, State};
use axum::Json;
use gridkeep_domain_billing::check_credit;
use gridkeep_domain_models::TransactionType;
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn info(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<Value>, EngineError> {
    let user = state.users.find_by_id(&caller.user_id).await?;
    Ok(Json(json!({
        "credit_balance": user.credit_balance,
        "total_top_up": user.total_top_up,
        "total_spent": user.total_spent,
    })))
}

pub async fn transactions(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<Value>, EngineError> {
    let history = state.wallet.history_for(&caller.user_id, 50).await?;
    Ok(Json(json!({ "transactions": history })))
}

#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    pub amount: i64,
}

/// Records a direct top-up. In a real payment-gateway integration this
/// would only mark a pending transaction; capture happens in
/// `handlers::webhook::midtrans`.
pub async fn topup(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(request): Json<TopUpRequest>,
) -> Result<Json<Value>, EngineError> {
    if request.amount <= 0 {
        return Err(EngineError::BadRequest("top-up amount must be positive".into()));
    }
    let transaction = state
        .wallet
        .apply_ledger_entry(&caller.user_id, TransactionType::TopUp, request.amount, Some("wallet top-up"))
        .await?;
    Ok(Json(json!({ "transaction": transaction })))
}

#[derive(Debug, Deserialize)]
pub struct CheckCreditRequest {
    pub amount: i64,
}

pub async fn check_credit_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(request): Json<CheckCreditRequest>,
) -> Result<Json<Value>, EngineError> {
    let user = state.users.find_by_id(&caller.user_id).await?;
    let outcome = check_credit(&user, request.amount);
    Ok(Json(json!({ "sufficient": matches!(outcome, gridkeep_domain_billing::CreditCheck::Sufficient) })))
}

pub async fn statistics(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<Value>, EngineError> {
    let user = state.users.find_by_id(&caller.user_id).await?;
    Ok(Json(json!({
        "total_top_up": user.total_top_up,
        "total_spent": user.total_spent,
        "net": user.total_top_up - user.total_spent,
    })))
}
