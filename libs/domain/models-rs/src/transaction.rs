// [libs/domain/models-rs/src/transaction.rs]
//! Wallet ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    TopUp,
    Charge,
    Refund,
    CouponCredit,
}

#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// One immutable ledger row. Invariant C: for a fixed `user_id`, ordering
/// `COMPLETED` rows by `created_at` must show `balance_after[n] ==
/// balance_before[n+1]`. Invariant D: `balance_after` is never negative.
/// `amount` is always non-negative; `kind` carries the sign (a `Charge` is
/// a debit, a `TopUp`/`Refund`/`CouponCredit` a credit).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionType,
    pub status: TransactionStatus,
    pub amount: i64,
    pub balance_before: i64,
    pub balance_after: i64,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}
