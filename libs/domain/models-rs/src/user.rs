// [libs/domain/models-rs/src/user.rs]
//! Identity and prepaid wallet snapshot for a control-plane subscriber.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Access classification. Administrators may bypass credit/quota checks
/// via the admin operations surface (C9); regular users cannot.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    User,
    Administrator,
}

/// A control-plane account. `credit_balance` is the live prepaid balance in
/// integer minor units; it must always equal the `balance_after` of the
/// user's most recent `COMPLETED` transaction (Invariant C, see
/// `gridkeep-infra-db::repositories::WalletRepository`).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    /// Non-negative prepaid balance in integer minor units.
    pub credit_balance: i64,
    pub total_top_up: i64,
    pub total_spent: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_sufficient_credit(&self, amount: i64) -> bool {
        self.credit_balance >= amount
    }
}
