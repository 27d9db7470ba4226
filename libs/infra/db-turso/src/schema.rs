// [libs/infra/db-turso/src/schema.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENCE SCHEMA (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA
 *
 * Three-phase idempotent application: base tables, additive column
 * migrations (tolerant of "duplicate column name" on re-run), then
 * indexes. Matches `SPEC_FULL.md` §A.3.
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument, warn};

const BASE_TABLES: &[(&str, &str)] = &[
    ("TABLE_USERS", r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL DEFAULT 'user',
            credit_balance INTEGER NOT NULL DEFAULT 0,
            total_top_up INTEGER NOT NULL DEFAULT 0,
            total_spent INTEGER NOT NULL DEFAULT 0,
            active INTEGER NOT NULL DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
    ("TABLE_SERVICE_CATEGORIES", r#"
        CREATE TABLE IF NOT EXISTS service_categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        );
    "#),
    ("TABLE_SERVICES", r#"
        CREATE TABLE IF NOT EXISTS services (
            id TEXT PRIMARY KEY,
            category_id TEXT NOT NULL REFERENCES service_categories(id),
            slug TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL,
            description TEXT,
            docker_image TEXT NOT NULL DEFAULT '',
            active INTEGER NOT NULL DEFAULT 1
        );
    "#),
    ("TABLE_SERVICE_PLANS", r#"
        CREATE TABLE IF NOT EXISTS service_plans (
            id TEXT PRIMARY KEY,
            service_id TEXT NOT NULL REFERENCES services(id),
            plan_type TEXT NOT NULL,
            name TEXT NOT NULL,
            price INTEGER NOT NULL,
            total_quota INTEGER NOT NULL,
            used_quota INTEGER NOT NULL DEFAULT 0,
            max_instances_per_user INTEGER NOT NULL DEFAULT 1,
            storage_gb INTEGER NOT NULL DEFAULT 0,
            active INTEGER NOT NULL DEFAULT 1
        );
    "#),
    ("TABLE_SUBSCRIPTIONS", r#"
        CREATE TABLE IF NOT EXISTS subscriptions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            service_id TEXT NOT NULL REFERENCES services(id),
            plan_id TEXT NOT NULL REFERENCES service_plans(id),
            status TEXT NOT NULL DEFAULT 'pending_payment',
            auto_renew INTEGER NOT NULL DEFAULT 1,
            started_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            end_date DATETIME,
            next_billing_at DATETIME,
            monthly_price INTEGER NOT NULL DEFAULT 0,
            last_charge_amount INTEGER NOT NULL DEFAULT 0,
            grace_period_end DATETIME,
            previous_plan_id TEXT,
            upgrade_date DATETIME,
            suspended_at DATETIME,
            cancelled_at DATETIME,
            cancellation_reason TEXT
        );
    "#),
    ("TABLE_SERVICE_INSTANCES", r#"
        CREATE TABLE IF NOT EXISTS service_instances (
            id TEXT PRIMARY KEY,
            subscription_id TEXT NOT NULL REFERENCES subscriptions(id),
            user_id TEXT NOT NULL REFERENCES users(id),
            status TEXT NOT NULL DEFAULT 'pending',
            pod_name TEXT,
            namespace TEXT NOT NULL,
            subdomain TEXT NOT NULL DEFAULT '',
            public_url TEXT NOT NULL DEFAULT '',
            ssl_enabled INTEGER NOT NULL DEFAULT 0,
            last_error TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
    ("TABLE_TRANSACTIONS", r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            kind TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            amount INTEGER NOT NULL,
            balance_before INTEGER NOT NULL,
            balance_after INTEGER NOT NULL,
            reference TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
    ("TABLE_COUPONS", r#"
        CREATE TABLE IF NOT EXISTS coupons (
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            kind TEXT NOT NULL,
            value INTEGER NOT NULL,
            max_redemptions INTEGER,
            redemption_count INTEGER NOT NULL DEFAULT 0,
            expires_at DATETIME,
            active INTEGER NOT NULL DEFAULT 1
        );
    "#),
    ("TABLE_COUPON_REDEMPTIONS", r#"
        CREATE TABLE IF NOT EXISTS coupon_redemptions (
            id TEXT PRIMARY KEY,
            coupon_id TEXT NOT NULL REFERENCES coupons(id),
            user_id TEXT NOT NULL REFERENCES users(id),
            transaction_id TEXT NOT NULL REFERENCES transactions(id),
            redeemed_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(coupon_id, user_id)
        );
    "#),
    ("TABLE_SYSTEM_STATE", r#"
        CREATE TABLE IF NOT EXISTS system_state (
            key TEXT PRIMARY KEY,
            value_text TEXT,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
];

/// Additive migrations, tolerant of re-application against an already
/// up-to-date database (`"duplicate column name"` is swallowed).
const EVOLUTIONARY_MIGRATIONS: &[(&str, &str)] = &[
    (
        "SUBSCRIPTION_CYCLE_KEY",
        "ALTER TABLE subscriptions ADD COLUMN billing_cycle_start DATETIME",
    ),
    (
        "INSTANCE_UPDATED_AT_BACKFILL",
        "ALTER TABLE service_instances ADD COLUMN reconciled_at DATETIME",
    ),
    (
        "SUBSCRIPTION_BILLING_SNAPSHOT",
        "ALTER TABLE subscriptions ADD COLUMN end_date DATETIME",
    ),
    (
        "SUBSCRIPTION_MONTHLY_PRICE",
        "ALTER TABLE subscriptions ADD COLUMN monthly_price INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "SUBSCRIPTION_LAST_CHARGE_AMOUNT",
        "ALTER TABLE subscriptions ADD COLUMN last_charge_amount INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "SUBSCRIPTION_GRACE_PERIOD_END",
        "ALTER TABLE subscriptions ADD COLUMN grace_period_end DATETIME",
    ),
    (
        "SUBSCRIPTION_PREVIOUS_PLAN",
        "ALTER TABLE subscriptions ADD COLUMN previous_plan_id TEXT",
    ),
    (
        "SUBSCRIPTION_UPGRADE_DATE",
        "ALTER TABLE subscriptions ADD COLUMN upgrade_date DATETIME",
    ),
    (
        "SUBSCRIPTION_CANCELLATION_REASON",
        "ALTER TABLE subscriptions ADD COLUMN cancellation_reason TEXT",
    ),
    (
        "SERVICE_SLUG",
        "ALTER TABLE services ADD COLUMN slug TEXT NOT NULL DEFAULT ''",
    ),
    (
        "SERVICE_DOCKER_IMAGE",
        "ALTER TABLE services ADD COLUMN docker_image TEXT NOT NULL DEFAULT ''",
    ),
    (
        "SERVICE_PLAN_STORAGE_GB",
        "ALTER TABLE service_plans ADD COLUMN storage_gb INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "INSTANCE_SUBDOMAIN",
        "ALTER TABLE service_instances ADD COLUMN subdomain TEXT NOT NULL DEFAULT ''",
    ),
    (
        "INSTANCE_PUBLIC_URL",
        "ALTER TABLE service_instances ADD COLUMN public_url TEXT NOT NULL DEFAULT ''",
    ),
    (
        "INSTANCE_SSL_ENABLED",
        "ALTER TABLE service_instances ADD COLUMN ssl_enabled INTEGER NOT NULL DEFAULT 0",
    ),
];

const INDEXES: &[(&str, &str)] = &[
    ("IDX_SUBSCRIPTIONS_USER", "CREATE INDEX IF NOT EXISTS idx_subscriptions_user ON subscriptions(user_id, service_id, status);"),
    ("IDX_INSTANCES_SUBSCRIPTION", "CREATE INDEX IF NOT EXISTS idx_instances_subscription ON service_instances(subscription_id);"),
    ("IDX_INSTANCES_STATUS", "CREATE INDEX IF NOT EXISTS idx_instances_status ON service_instances(status, updated_at);"),
    ("IDX_TRANSACTIONS_USER", "CREATE INDEX IF NOT EXISTS idx_transactions_user ON transactions(user_id, created_at);"),
    ("IDX_SERVICE_PLANS_SERVICE", "CREATE INDEX IF NOT EXISTS idx_service_plans_service ON service_plans(service_id);"),
    ("IDX_COUPON_REDEMPTIONS_COUPON", "CREATE INDEX IF NOT EXISTS idx_coupon_redemptions_coupon ON coupon_redemptions(coupon_id);"),
];

#[instrument(skip(connection))]
pub async fn apply_full_schema(connection: &Connection) -> Result<()> {
    info!("applying control-plane schema");
    create_base_tables(connection).await?;
    apply_evolutionary_migrations(connection).await?;
    create_indexes(connection).await?;
    info!("schema synchronized");
    Ok(())
}

async fn create_base_tables(db: &Connection) -> Result<()> {
    for (name, sql) in BASE_TABLES {
        debug!("creating table: {}", name);
        db.execute(sql, ())
            .await
            .with_context(|| format!("failed to create table: {}", name))?;
    }
    Ok(())
}

async fn apply_evolutionary_migrations(db: &Connection) -> Result<()> {
    for (name, sql) in EVOLUTIONARY_MIGRATIONS {
        match db.execute(sql, ()).await {
            Ok(_) => info!("applied migration: {}", name),
            Err(error) => {
                let message = error.to_string();
                if message.contains("duplicate column name") {
                    debug!("migration already applied: {}", name);
                } else {
                    warn!("migration {} did not apply cleanly: {}", name, message);
                }
            }
        }
    }
    Ok(())
}

async fn create_indexes(db: &Connection) -> Result<()> {
    for (name, sql) in INDEXES {
        debug!("creating index: {}", name);
        db.execute(sql, ())
            .await
            .with_context(|| format!("failed to create index: {}", name))?;
    }
    Ok(())
}
