// [libs/infra/db-turso/src/errors.rs]
/*!
 * =================================================================
 * APARATO: DATABASE ERROR CATALOG (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE PERSISTENCIA
 *
 * Mirrors the error-kind table in `spec.md` §7 at the repository
 * boundary. `gridkeep-control-plane::EngineError` composes these into
 * the single HTTP status-code mapping.
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("[L3_DB_NET_FAULT]: {0}")]
    ConnectionError(String),

    #[error("[L3_DB_CONFIG_FAULT]: {0}")]
    ConfigurationError(String),

    #[error("[L3_DB_QUERY_FAULT]: {0}")]
    QueryError(#[from] libsql::Error),

    #[error("[L3_DB_MAPPING_FAULT]: {0}")]
    MappingError(String),

    #[error("[L3_DB_FAULT]: transaction collapsed")]
    TransactionError,

    #[error("[L3_DB_CONFLICT]: ledger write conflicted with a concurrent writer")]
    LedgerConflict,

    // --- Domain-not-found variants, mirroring spec.md §7 ---
    #[error("[L3_USER_FAULT]: USER_NOT_FOUND")]
    UserNotFound,

    #[error("[L3_CATALOG_FAULT]: PLAN_NOT_FOUND")]
    PlanNotFound,

    #[error("[L3_SUBSCRIPTION_FAULT]: SUBSCRIPTION_NOT_FOUND")]
    SubscriptionNotFound,

    #[error("[L3_INSTANCE_FAULT]: INSTANCE_NOT_FOUND")]
    InstanceNotFound,

    #[error("[L3_SUBSCRIPTION_FAULT]: DUPLICATE_SUBSCRIPTION")]
    DuplicateSubscription,

    #[error("[L3_WALLET_FAULT]: INSUFFICIENT_CREDIT")]
    InsufficientCredit,

    #[error("[L3_CATALOG_FAULT]: QUOTA_EXCEEDED")]
    QuotaExceeded,

    #[error("[L3_SUBSCRIPTION_FAULT]: INVALID_TRANSITION")]
    InvalidTransition,

    #[error("[L3_COUPON_FAULT]: COUPON_NOT_REDEEMABLE")]
    CouponNotRedeemable,
}
