// [apps/control-plane/src/handlers/webhook.rs]
//! Payment gateway webhook (`spec.md` §6: `POST /wallet/webhook/midtrans`).
//! No bearer auth; authenticity rests on a shared secret carried in the
//! payload itself, checked against `RuntimeConfig::webhook_secret`.

use crate::errors::EngineError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use gridkeep_domain_models::TransactionType;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct MidtransNotification {
    pub order_id: String,
    pub user_id: String,
    pub amount: i64,
    pub transaction_status: String,
    pub signature_key: String,
}

pub async fn midtrans(
    State(state): State<AppState>,
    Json(notification): Json<MidtransNotification>,
) -> Result<Json<Value>, EngineError> {
    if notification.signature_key != state.config.webhook_secret {
        warn!(order_id = %notification.order_id, "rejected midtrans webhook: signature mismatch");
        return Err(EngineError::Forbidden);
    }

    if notification.transaction_status != "settlement" && notification.transaction_status != "capture" {
        info!(order_id = %notification.order_id, status = %notification.transaction_status, "midtrans webhook: non-success status, ignored");
        return Ok(Json(json!({ "acknowledged": true })));
    }

    if notification.amount <= 0 {
        return Err(EngineError::BadRequest("webhook amount must be positive".into()));
    }

    let transaction = state
        .wallet
        .apply_ledger_entry(
            &notification.user_id,
            TransactionType::TopUp,
            notification.amount,
            Some(&notification.order_id),
        )
        .await?;

    info!(order_id = %notification.order_id, user_id = %notification.user_id, amount = notification.amount, "midtrans top-up captured");
    Ok(Json(json!({ "acknowledged": true, "transaction": transaction })))
}
