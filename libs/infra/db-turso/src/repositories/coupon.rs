// [libs/infra/db-turso/src/repositories/coupon.rs]
//! Coupon catalog and redemption. A redemption is a single transaction:
//! validate the coupon, insert the `coupon_redemptions` row (its
//! `UNIQUE(coupon_id, user_id)` constraint is the second line of defense
//! against double-redeeming the same coupon), credit the wallet, and bump
//! the coupon's counter.

use crate::errors::DbError;
use crate::mapping::parse_optional_timestamp;
use crate::GatewayClient;
use gridkeep_domain_models::{Coupon, CouponKind, CouponRedemption, TransactionType};
use libsql::{params, Row};
use tracing::instrument;

pub struct CouponRepository {
    client: GatewayClient,
}

impl CouponRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Coupon, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, code, kind, value, max_redemptions, redemption_count, expires_at, active
                 FROM coupons WHERE code = ?1",
                params![code],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Self::map_row(&row),
            None => Err(DbError::CouponNotRedeemable),
        }
    }

    /// Redeems `coupon_id` for `user_id`, crediting the wallet by the
    /// coupon's fixed-credit value (percent-off coupons apply at checkout
    /// time and are not redeemed through the wallet ledger). Returns the
    /// recorded redemption.
    #[instrument(skip(self))]
    pub async fn redeem(&self, coupon_id: &str, user_id: &str, credit_amount: i64) -> Result<CouponRedemption, DbError> {
        let connection = self.client.get_connection()?;
        let transaction = connection.transaction().await?;

        let mut rows = transaction
            .query(
                "SELECT id, code, kind, value, max_redemptions, redemption_count, expires_at, active
                 FROM coupons WHERE id = ?1",
                params![coupon_id],
            )
            .await?;
        let coupon = match rows.next().await? {
            Some(row) => Self::map_row(&row)?,
            None => return Err(DbError::CouponNotRedeemable),
        };
        drop(rows);

        if !coupon.is_redeemable(chrono::Utc::now()) {
            return Err(DbError::CouponNotRedeemable);
        }

        let redemption_id = uuid::Uuid::new_v4().to_string();
        transaction
            .execute(
                "INSERT INTO coupon_redemptions (id, coupon_id, user_id) VALUES (?1, ?2, ?3)",
                params![redemption_id.clone(), coupon_id, user_id],
            )
            .await?;

        transaction
            .execute(
                "UPDATE coupons SET redemption_count = redemption_count + 1 WHERE id = ?1",
                params![coupon_id],
            )
            .await?;

        let mut balance_rows = transaction
            .query("SELECT credit_balance FROM users WHERE id = ?1", params![user_id])
            .await?;
        let balance_before: i64 = match balance_rows.next().await? {
            Some(row) => row.get(0)?,
            None => return Err(DbError::UserNotFound),
        };
        drop(balance_rows);
        let balance_after = balance_before + credit_amount;

        transaction
            .execute(
                "UPDATE users SET credit_balance = ?2, total_top_up = total_top_up + ?3 WHERE id = ?1",
                params![user_id, balance_after, credit_amount],
            )
            .await?;

        let ledger_id = uuid::Uuid::new_v4().to_string();
        transaction
            .execute(
                "INSERT INTO transactions
                    (id, user_id, kind, status, amount, balance_before, balance_after, reference)
                 VALUES (?1, ?2, 'coupon_credit', 'completed', ?3, ?4, ?5, ?6)",
                params![ledger_id.clone(), user_id, credit_amount, balance_before, balance_after, coupon_id],
            )
            .await?;

        transaction.commit().await?;

        Ok(CouponRedemption {
            id: redemption_id,
            coupon_id: coupon_id.to_string(),
            user_id: user_id.to_string(),
            transaction_id: ledger_id,
            redeemed_at: chrono::Utc::now(),
        })
    }

    fn map_row(row: &Row) -> Result<Coupon, DbError> {
        let kind_label: String = row.get(2)?;
        Ok(Coupon {
            id: row.get(0)?,
            code: row.get(1)?,
            kind: label_to_kind(&kind_label),
            value: row.get(3)?,
            max_redemptions: row.get::<Option<i64>>(4)?.map(|value| value as i32),
            redemption_count: row.get::<i64>(5)? as i32,
            expires_at: parse_optional_timestamp(row.get::<Option<String>>(6)?)?,
            active: row.get::<i64>(7)? != 0,
        })
    }
}

fn label_to_kind(label: &str) -> CouponKind {
    match label {
        "percent_off" => CouponKind::PercentOff,
        _ => CouponKind::FixedCredit,
    }
}

/// The ledger entry kind a redeemed coupon is recorded under.
pub const COUPON_TRANSACTION_KIND: TransactionType = TransactionType::CouponCredit;
