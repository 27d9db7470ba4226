// [libs/infra/db-turso/src/repositories/wallet.rs]
//! Wallet ledger (C2): every balance mutation is a transaction row, written
//! and applied to `users.credit_balance` inside a single libSQL transaction
//! so Invariant C (ledger continuity) and Invariant D (non-negative
//! balance) can never be observed violated.

use crate::errors::DbError;
use crate::mapping::parse_timestamp;
use crate::GatewayClient;
use gridkeep_domain_models::{Transaction, TransactionStatus, TransactionType};
use libsql::{params, Row};
use tracing::{info, instrument};

pub struct WalletRepository {
    client: GatewayClient,
}

impl WalletRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn balance_of(&self, user_id: &str) -> Result<i64, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query("SELECT credit_balance FROM users WHERE id = ?1", params![user_id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get(0)?),
            None => Err(DbError::UserNotFound),
        }
    }

    /// Applies a signed ledger entry (`delta` positive for top-up/refund,
    /// negative for a charge) and writes the immutable `transactions` row
    /// in the same transaction. Rejects the charge with
    /// `DbError::InsufficientCredit` rather than letting the balance go
    /// negative. `total_spent` is decremented on a `Refund` (by at most
    /// what was actually spent) rather than on every positive delta,
    /// since a top-up is not a reversal of spend.
    #[instrument(skip(self))]
    pub async fn apply_ledger_entry(
        &self,
        user_id: &str,
        kind: TransactionType,
        delta: i64,
        reference: Option<&str>,
    ) -> Result<Transaction, DbError> {
        let connection = self.client.get_connection()?;
        let transaction = connection.transaction().await?;

        let mut rows = transaction
            .query("SELECT credit_balance, total_spent FROM users WHERE id = ?1", params![user_id])
            .await?;
        let (balance_before, total_spent_before): (i64, i64) = match rows.next().await? {
            Some(row) => (row.get(0)?, row.get(1)?),
            None => return Err(DbError::UserNotFound),
        };
        drop(rows);

        let balance_after = balance_before + delta;
        if balance_after < 0 {
            return Err(DbError::InsufficientCredit);
        }

        let top_up_increment = if delta > 0 && kind == TransactionType::TopUp { delta } else { 0 };
        let spent_increment = if delta < 0 { -delta } else { 0 };
        let spent_decrement = if kind == TransactionType::Refund {
            delta.min(total_spent_before)
        } else {
            0
        };

        let affected = transaction
            .execute(
                "UPDATE users SET credit_balance = ?2,
                    total_top_up = total_top_up + ?3,
                    total_spent = total_spent + ?4 - ?5
                 WHERE id = ?1",
                params![user_id, balance_after, top_up_increment, spent_increment, spent_decrement],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::UserNotFound);
        }

        let amount = delta.abs();
        let ledger_id = uuid::Uuid::new_v4().to_string();
        transaction
            .execute(
                "INSERT INTO transactions
                    (id, user_id, kind, status, amount, balance_before, balance_after, reference)
                 VALUES (?1, ?2, ?3, 'completed', ?4, ?5, ?6, ?7)",
                params![
                    ledger_id.clone(),
                    user_id,
                    kind_to_label(kind),
                    amount,
                    balance_before,
                    balance_after,
                    reference
                ],
            )
            .await?;

        transaction.commit().await?;

        info!(
            user_id,
            balance_before, balance_after, "ledger entry applied"
        );

        Ok(Transaction {
            id: ledger_id,
            user_id: user_id.to_string(),
            kind,
            status: TransactionStatus::Completed,
            amount,
            balance_before,
            balance_after,
            reference: reference.map(str::to_string),
            created_at: chrono::Utc::now(),
        })
    }

    #[instrument(skip(self))]
    pub async fn history_for(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, user_id, kind, status, amount, balance_before, balance_after, reference, created_at
                 FROM transactions WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2",
                params![user_id, limit],
            )
            .await?;

        let mut history = Vec::new();
        while let Some(row) = rows.next().await? {
            history.push(Self::map_row(&row)?);
        }
        Ok(history)
    }

    fn map_row(row: &Row) -> Result<Transaction, DbError> {
        let kind_label: String = row.get(2)?;
        let status_label: String = row.get(3)?;
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            kind: label_to_kind(&kind_label),
            status: label_to_status(&status_label),
            amount: row.get(4)?,
            balance_before: row.get(5)?,
            balance_after: row.get(6)?,
            reference: row.get(7)?,
            created_at: parse_timestamp(row.get::<String>(8)?)?,
        })
    }
}

fn kind_to_label(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::TopUp => "top_up",
        TransactionType::Charge => "charge",
        TransactionType::Refund => "refund",
        TransactionType::CouponCredit => "coupon_credit",
    }
}

fn label_to_kind(label: &str) -> TransactionType {
    match label {
        "top_up" => TransactionType::TopUp,
        "refund" => TransactionType::Refund,
        "coupon_credit" => TransactionType::CouponCredit,
        _ => TransactionType::Charge,
    }
}

fn label_to_status(label: &str) -> TransactionStatus {
    match label {
        "completed" => TransactionStatus::Completed,
        "failed" => TransactionStatus::Failed,
        _ => TransactionStatus::Pending,
    }
}
