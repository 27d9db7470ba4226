// [libs/infra/db-turso/src/repositories/subscription.rs]
//! Subscription engine persistence (C7). Every transition statement
//! guards its `WHERE status = '<expected>'` clause so a concurrent writer
//! loses the race cleanly instead of corrupting the state machine.

use crate::errors::DbError;
use crate::mapping::parse_optional_timestamp;
use crate::GatewayClient;
use chrono::{DateTime, Utc};
use gridkeep_domain_models::{Subscription, SubscriptionStatus};
use libsql::{params, Row};
use tracing::{instrument, warn};

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, service_id, plan_id, status, auto_renew,
    started_at, end_date, next_billing_at, monthly_price, last_charge_amount,
    grace_period_end, previous_plan_id, upgrade_date, suspended_at, cancelled_at,
    cancellation_reason";

pub struct SubscriptionRepository {
    client: GatewayClient,
}

impl SubscriptionRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, subscription_id: &str) -> Result<Subscription, DbError> {
        let connection = self.client.get_connection()?;
        let sql = format!("SELECT {} FROM subscriptions WHERE id = ?1", SUBSCRIPTION_COLUMNS);
        let mut rows = connection.query(&sql, params![subscription_id]).await?;
        match rows.next().await? {
            Some(row) => Self::map_row(&row),
            None => Err(DbError::SubscriptionNotFound),
        }
    }

    /// Invariant A: at most one non-terminal subscription per
    /// `(user_id, service_id)`. Checked inside the same transaction that
    /// inserts the new row so two concurrent "subscribe" calls cannot both
    /// pass the check.
    #[instrument(skip(self))]
    pub async fn create_pending(
        &self,
        user_id: &str,
        service_id: &str,
        plan_id: &str,
    ) -> Result<Subscription, DbError> {
        let connection = self.client.get_connection()?;
        let transaction = connection.transaction().await?;

        let mut existing = transaction
            .query(
                "SELECT COUNT(*) FROM subscriptions
                 WHERE user_id = ?1 AND service_id = ?2
                   AND status NOT IN ('cancelled', 'expired')",
                params![user_id, service_id],
            )
            .await?;
        let existing_count: i64 = match existing.next().await? {
            Some(row) => row.get(0)?,
            None => 0,
        };
        drop(existing);

        if existing_count > 0 {
            return Err(DbError::DuplicateSubscription);
        }

        let id = uuid::Uuid::new_v4().to_string();
        transaction
            .execute(
                "INSERT INTO subscriptions (id, user_id, service_id, plan_id, status)
                 VALUES (?1, ?2, ?3, ?4, 'pending_payment')",
                params![id.clone(), user_id, service_id, plan_id],
            )
            .await?;

        transaction.commit().await?;
        self.find_by_id(&id).await
    }

    /// Moves `PENDING_PAYMENT` to `ACTIVE` and snapshots the billing terms
    /// agreed at creation time: `end_date`/`next_billing_at` both 30 days
    /// out, `monthly_price`/`last_charge_amount` frozen off the plan's
    /// price at the moment of purchase (`spec.md` §4.7 `create`).
    #[instrument(skip(self))]
    pub async fn activate(
        &self,
        subscription_id: &str,
        end_date: DateTime<Utc>,
        monthly_price: i64,
        last_charge_amount: i64,
    ) -> Result<(), DbError> {
        self.guarded_transition(
            subscription_id,
            "pending_payment",
            "UPDATE subscriptions
             SET status = 'active', end_date = ?2, next_billing_at = ?2,
                 monthly_price = ?3, last_charge_amount = ?4
             WHERE id = ?1 AND status = ?5",
            params![
                subscription_id,
                end_date.to_rfc3339(),
                monthly_price,
                last_charge_amount,
                "pending_payment"
            ],
        )
        .await
    }

    /// Records the new plan and the proration snapshot in one step; the
    /// subscription returns to `ACTIVE` immediately since upgrades are
    /// not a separate billing cycle (`spec.md` §4.7 `upgrade`).
    #[instrument(skip(self))]
    pub async fn upgrade(
        &self,
        subscription_id: &str,
        new_plan_id: &str,
        previous_plan_id: &str,
        upgrade_date: DateTime<Utc>,
        monthly_price: i64,
        last_charge_amount: i64,
    ) -> Result<(), DbError> {
        self.guarded_transition(
            subscription_id,
            "active",
            "UPDATE subscriptions
             SET plan_id = ?2, previous_plan_id = ?3, upgrade_date = ?4,
                 monthly_price = ?5, last_charge_amount = ?6
             WHERE id = ?1 AND status = ?7",
            params![
                subscription_id,
                new_plan_id,
                previous_plan_id,
                upgrade_date.to_rfc3339(),
                monthly_price,
                last_charge_amount,
                "active"
            ],
        )
        .await
    }

    /// ACTIVE -> CANCELLED. No refund; `autoRenew` is cleared so a later
    /// reactivation attempt cannot accidentally re-bill (`spec.md` §4.7
    /// `cancel`).
    #[instrument(skip(self))]
    pub async fn cancel(&self, subscription_id: &str, reason: Option<&str>) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE subscriptions
                 SET status = 'cancelled', auto_renew = 0,
                     cancellation_reason = ?2, cancelled_at = CURRENT_TIMESTAMP
                 WHERE id = ?1 AND status IN ('active', 'pending_upgrade', 'suspended')",
                params![subscription_id, reason],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::InvalidTransition);
        }
        Ok(())
    }

    /// Admin-only force cancel: valid from any non-terminal state
    /// (`spec.md` §4.9).
    #[instrument(skip(self))]
    pub async fn force_cancel(&self, subscription_id: &str, reason: Option<&str>) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE subscriptions
                 SET status = 'cancelled', auto_renew = 0,
                     cancellation_reason = ?2, cancelled_at = CURRENT_TIMESTAMP
                 WHERE id = ?1 AND status NOT IN ('cancelled', 'expired')",
                params![subscription_id, reason],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::SubscriptionNotFound);
        }
        Ok(())
    }

    /// ACTIVE -> SUSPENDED, opened when the grace period granted by
    /// `enter_grace` runs out with the renewal still unpaid. Quota release
    /// happens here, at the transition that actually stops billing for the
    /// slot, not later at expiry (`spec.md` §4.8 `grace-period`).
    #[instrument(skip(self))]
    pub async fn suspend(&self, subscription_id: &str) -> Result<(), DbError> {
        self.guarded_transition(
            subscription_id,
            "active",
            "UPDATE subscriptions SET status = 'suspended', suspended_at = CURRENT_TIMESTAMP
             WHERE id = ?1 AND status = ?2",
            params![subscription_id, "active"],
        )
        .await
    }

    /// Re-enables `autoRenew` on a still-paid-for `CANCELLED` subscription,
    /// taking it straight back to `ACTIVE` (`spec.md` §4.7
    /// `toggleAutoRenew`).
    #[instrument(skip(self))]
    pub async fn reactivate_from_cancellation(&self, subscription_id: &str) -> Result<(), DbError> {
        self.guarded_transition(
            subscription_id,
            "cancelled",
            "UPDATE subscriptions SET status = 'active', auto_renew = 1,
                cancelled_at = NULL, cancellation_reason = NULL
             WHERE id = ?1 AND status = ?2",
            params![subscription_id, "cancelled"],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn expire(&self, subscription_id: &str) -> Result<(), DbError> {
        self.guarded_transition(
            subscription_id,
            "suspended",
            "UPDATE subscriptions SET status = 'expired' WHERE id = ?1 AND status = ?2",
            params![subscription_id, "suspended"],
        )
        .await
    }

    /// Advances the billing window on a successful renewal charge without
    /// changing `status` (the subscription was already `active`).
    #[instrument(skip(self))]
    pub async fn renew(
        &self,
        subscription_id: &str,
        new_end_date: DateTime<Utc>,
        last_charge_amount: i64,
    ) -> Result<(), DbError> {
        self.guarded_transition(
            subscription_id,
            "active",
            "UPDATE subscriptions
             SET end_date = ?2, next_billing_at = ?2, last_charge_amount = ?3, grace_period_end = NULL
             WHERE id = ?1 AND status = ?4",
            params![subscription_id, new_end_date.to_rfc3339(), last_charge_amount, "active"],
        )
        .await
    }

    /// Opens a grace window on a renewal that could not be charged, without
    /// suspending the instance: the subscription stays `ACTIVE` through the
    /// window (`spec.md` §4.8 `daily-renewals`, `INSUFFICIENT_CREDIT`
    /// branch).
    #[instrument(skip(self))]
    pub async fn enter_grace(&self, subscription_id: &str, grace_period_end: DateTime<Utc>) -> Result<(), DbError> {
        self.guarded_transition(
            subscription_id,
            "active",
            "UPDATE subscriptions SET grace_period_end = ?2 WHERE id = ?1 AND status = ?3",
            params![subscription_id, grace_period_end.to_rfc3339(), "active"],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_auto_renew(&self, subscription_id: &str, auto_renew: bool) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE subscriptions SET auto_renew = ?2 WHERE id = ?1",
                params![subscription_id, auto_renew as i64],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::SubscriptionNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn due_for_billing(&self, as_of: DateTime<Utc>) -> Result<Vec<Subscription>, DbError> {
        let connection = self.client.get_connection()?;
        let sql = format!(
            "SELECT {} FROM subscriptions
             WHERE status = 'active' AND auto_renew = 1 AND next_billing_at <= ?1
             ORDER BY next_billing_at ASC, id ASC",
            SUBSCRIPTION_COLUMNS
        );
        let mut rows = connection.query(&sql, params![as_of.to_rfc3339()]).await?;
        let mut due = Vec::new();
        while let Some(row) = rows.next().await? {
            due.push(Self::map_row(&row)?);
        }
        Ok(due)
    }

    /// Subscriptions whose grace window has closed with the renewal still
    /// unpaid: these are the ACTIVE -> SUSPENDED candidates for the
    /// `grace-period` job.
    #[instrument(skip(self))]
    pub async fn grace_period_expired(&self, as_of: DateTime<Utc>) -> Result<Vec<Subscription>, DbError> {
        let connection = self.client.get_connection()?;
        let sql = format!(
            "SELECT {} FROM subscriptions
             WHERE status = 'active' AND grace_period_end IS NOT NULL AND grace_period_end <= ?1
             ORDER BY grace_period_end ASC, id ASC",
            SUBSCRIPTION_COLUMNS
        );
        let mut rows = connection.query(&sql, params![as_of.to_rfc3339()]).await?;
        let mut expired = Vec::new();
        while let Some(row) = rows.next().await? {
            expired.push(Self::map_row(&row)?);
        }
        Ok(expired)
    }

    /// Subscriptions suspended long enough ago that the further
    /// SUSPENDED -> EXPIRED window has closed (`spec.md` §4.8
    /// `grace-period`, second phase).
    #[instrument(skip(self))]
    pub async fn suspended_past_grace(&self, cutoff: DateTime<Utc>) -> Result<Vec<Subscription>, DbError> {
        let connection = self.client.get_connection()?;
        let sql = format!(
            "SELECT {} FROM subscriptions
             WHERE status = 'suspended' AND suspended_at <= ?1
             ORDER BY suspended_at ASC, id ASC",
            SUBSCRIPTION_COLUMNS
        );
        let mut rows = connection.query(&sql, params![cutoff.to_rfc3339()]).await?;
        let mut expired = Vec::new();
        while let Some(row) = rows.next().await? {
            expired.push(Self::map_row(&row)?);
        }
        Ok(expired)
    }

    /// Subscriptions still inside an open grace window, for the daily
    /// `grace-period-reminders` job.
    #[instrument(skip(self))]
    pub async fn in_grace_period(&self, as_of: DateTime<Utc>) -> Result<Vec<Subscription>, DbError> {
        let connection = self.client.get_connection()?;
        let sql = format!(
            "SELECT {} FROM subscriptions
             WHERE status = 'active' AND grace_period_end IS NOT NULL AND grace_period_end > ?1",
            SUBSCRIPTION_COLUMNS
        );
        let mut rows = connection.query(&sql, params![as_of.to_rfc3339()]).await?;
        let mut in_grace = Vec::new();
        while let Some(row) = rows.next().await? {
            in_grace.push(Self::map_row(&row)?);
        }
        Ok(in_grace)
    }

    /// ACTIVE subs renewing within `window` whose balance cannot cover
    /// `monthlyPrice`, for `low-credit-notifications`.
    #[instrument(skip(self))]
    pub async fn due_within(&self, as_of: DateTime<Utc>, horizon: DateTime<Utc>) -> Result<Vec<Subscription>, DbError> {
        let connection = self.client.get_connection()?;
        let sql = format!(
            "SELECT {} FROM subscriptions
             WHERE status = 'active' AND next_billing_at > ?1 AND next_billing_at <= ?2",
            SUBSCRIPTION_COLUMNS
        );
        let mut rows = connection.query(&sql, params![as_of.to_rfc3339(), horizon.to_rfc3339()]).await?;
        let mut due_soon = Vec::new();
        while let Some(row) = rows.next().await? {
            due_soon.push(Self::map_row(&row)?);
        }
        Ok(due_soon)
    }

    /// Admin listing (`spec.md` §6 `/admin/subscriptions/:userId`).
    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Subscription>, DbError> {
        let connection = self.client.get_connection()?;
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE user_id = ?1 ORDER BY started_at DESC",
            SUBSCRIPTION_COLUMNS
        );
        let mut rows = connection.query(&sql, params![user_id]).await?;
        let mut subscriptions = Vec::new();
        while let Some(row) = rows.next().await? {
            subscriptions.push(Self::map_row(&row)?);
        }
        Ok(subscriptions)
    }

    async fn guarded_transition(
        &self,
        subscription_id: &str,
        expected_status: &str,
        sql: &str,
        bound_params: impl libsql::params::IntoParams,
    ) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection.execute(sql, bound_params).await?;
        if affected == 0 {
            warn!(subscription_id, expected_status, "subscription transition rejected");
            return Err(DbError::InvalidTransition);
        }
        Ok(())
    }

    fn map_row(row: &Row) -> Result<Subscription, DbError> {
        let status_label: String = row.get(4)?;
        Ok(Subscription {
            id: row.get(0)?,
            user_id: row.get(1)?,
            service_id: row.get(2)?,
            plan_id: row.get(3)?,
            status: label_to_status(&status_label),
            auto_renew: row.get::<i64>(5)? != 0,
            started_at: crate::mapping::parse_timestamp(row.get::<String>(6)?)?,
            end_date: parse_optional_timestamp(row.get::<Option<String>>(7)?)?,
            next_billing_at: parse_optional_timestamp(row.get::<Option<String>>(8)?)?,
            monthly_price: row.get(9)?,
            last_charge_amount: row.get(10)?,
            grace_period_end: parse_optional_timestamp(row.get::<Option<String>>(11)?)?,
            previous_plan_id: row.get(12)?,
            upgrade_date: parse_optional_timestamp(row.get::<Option<String>>(13)?)?,
            suspended_at: parse_optional_timestamp(row.get::<Option<String>>(14)?)?,
            cancelled_at: parse_optional_timestamp(row.get::<Option<String>>(15)?)?,
            cancellation_reason: row.get(16)?,
        })
    }
}

fn label_to_status(label: &str) -> SubscriptionStatus {
    match label {
        "active" => SubscriptionStatus::Active,
        "pending_upgrade" => SubscriptionStatus::PendingUpgrade,
        "cancelled" => SubscriptionStatus::Cancelled,
        "expired" => SubscriptionStatus::Expired,
        "suspended" => SubscriptionStatus::Suspended,
        _ => SubscriptionStatus::PendingPayment,
    }
}
