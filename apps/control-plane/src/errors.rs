// [apps/control-plane/src/errors.rs]
//! Single tagged error enum for the control plane boundary. Composes
//! `DbError` and `ClientError` from the infrastructure crates plus its own
//! engine-level kinds, and maps every kind to exactly one HTTP status code
//! here — nowhere else in the application does that mapping happen.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gridkeep_infra_db::DbError;
use gridkeep_infra_orchestrator_client::ClientError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("persistence failure: {0}")]
    Db(#[from] DbError),

    #[error("orchestrator failure: {0}")]
    Orchestrator(#[from] ClientError),

    #[error("cross-user access denied")]
    Forbidden,

    #[error("insufficient credit")]
    InsufficientCredit,

    #[error("quota exhausted")]
    QuotaExceeded,

    #[error("invalid state transition")]
    InvalidTransition,

    #[error("duplicate subscription")]
    DuplicateSubscription,

    #[error("resource not found")]
    NotFound,

    #[error("readiness timeout")]
    TimeoutReady,

    #[error("serialization conflict after retries")]
    LedgerConflict,

    #[error("coupon is not redeemable")]
    CouponNotRedeemable,

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Db(DbError::UserNotFound) => "USER_NOT_FOUND",
            EngineError::Db(DbError::PlanNotFound) => "PLAN_NOT_FOUND",
            EngineError::Db(DbError::SubscriptionNotFound) => "SUBSCRIPTION_NOT_FOUND",
            EngineError::Db(DbError::InstanceNotFound) => "INSTANCE_NOT_FOUND",
            EngineError::Db(DbError::DuplicateSubscription) => "DUPLICATE_SUBSCRIPTION",
            EngineError::Db(DbError::InsufficientCredit) => "INSUFFICIENT_CREDIT",
            EngineError::Db(DbError::QuotaExceeded) => "QUOTA_EXCEEDED",
            EngineError::Db(DbError::InvalidTransition) => "INVALID_TRANSITION",
            EngineError::Db(DbError::CouponNotRedeemable) => "COUPON_NOT_REDEEMABLE",
            EngineError::Db(_) => "PERSISTENCE_FAULT",
            EngineError::Orchestrator(ClientError::Transient(_))
            | EngineError::Orchestrator(ClientError::NetworkFault(_)) => "ORCHESTRATOR_TRANSIENT",
            EngineError::Orchestrator(ClientError::Permanent(_)) => "ORCHESTRATOR_PERMANENT",
            EngineError::Orchestrator(ClientError::TimeoutReady) => "TIMEOUT_READY",
            EngineError::Orchestrator(_) => "ORCHESTRATOR_PERMANENT",
            EngineError::Forbidden => "FORBIDDEN",
            EngineError::InsufficientCredit => "INSUFFICIENT_CREDIT",
            EngineError::QuotaExceeded => "QUOTA_EXCEEDED",
            EngineError::InvalidTransition => "INVALID_TRANSITION",
            EngineError::DuplicateSubscription => "DUPLICATE_SUBSCRIPTION",
            EngineError::NotFound => "NOT_FOUND",
            EngineError::TimeoutReady => "TIMEOUT_READY",
            EngineError::LedgerConflict => "LEDGER_CONFLICT",
            EngineError::CouponNotRedeemable => "COUPON_NOT_REDEEMABLE",
            EngineError::BadRequest(_) => "BAD_REQUEST",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            EngineError::Db(DbError::UserNotFound)
            | EngineError::Db(DbError::PlanNotFound)
            | EngineError::Db(DbError::SubscriptionNotFound)
            | EngineError::Db(DbError::InstanceNotFound)
            | EngineError::NotFound => StatusCode::NOT_FOUND,

            EngineError::Db(DbError::DuplicateSubscription) | EngineError::DuplicateSubscription => {
                StatusCode::CONFLICT
            }

            EngineError::Db(DbError::InsufficientCredit) | EngineError::InsufficientCredit => {
                StatusCode::BAD_REQUEST
            }

            EngineError::Db(DbError::QuotaExceeded) | EngineError::QuotaExceeded => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            EngineError::Db(DbError::InvalidTransition) | EngineError::InvalidTransition => {
                StatusCode::BAD_REQUEST
            }

            EngineError::Db(DbError::CouponNotRedeemable) | EngineError::CouponNotRedeemable => {
                StatusCode::BAD_REQUEST
            }

            EngineError::Db(DbError::LedgerConflict) | EngineError::LedgerConflict => {
                StatusCode::CONFLICT
            }

            EngineError::Forbidden => StatusCode::FORBIDDEN,

            EngineError::Orchestrator(ClientError::Transient(_))
            | EngineError::Orchestrator(ClientError::NetworkFault(_)) => StatusCode::SERVICE_UNAVAILABLE,

            EngineError::Orchestrator(ClientError::TimeoutReady) | EngineError::TimeoutReady => {
                StatusCode::GATEWAY_TIMEOUT
            }

            EngineError::Orchestrator(_) => StatusCode::BAD_GATEWAY,

            EngineError::BadRequest(_) => StatusCode::BAD_REQUEST,

            EngineError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, code = self.code(), "request failed");
        }
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
