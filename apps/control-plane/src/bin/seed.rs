// [apps/control-plane/src/bin/seed.rs]
//! Development seed data: one service category, one service, a plan per
//! `PlanType` tier, and a sample administrator account.

use dotenvy::dotenv;
use gridkeep_infra_db::GatewayClient;
use libsql::params;
use tracing::{error, info};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter("info,gridkeep_infra_db=debug")
        .with_target(false)
        .init();

    info!("seeding development catalog");

    let database_url = std::env::var("DATABASE_URL").expect("FATAL: DATABASE_URL is not set");
    let database_token = std::env::var("TURSO_AUTH_TOKEN").ok();

    let client = match GatewayClient::connect(&database_url, database_token).await {
        Ok(client) => client,
        Err(error) => {
            error!(%error, "could not connect to database");
            return Err(anyhow::anyhow!(error));
        }
    };
    let connection = client.get_connection()?;

    let category_id = "cat-hosting";
    connection
        .execute(
            "INSERT INTO service_categories (id, name, description) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO NOTHING",
            params![category_id, "Hosting", "Managed application hosting"],
        )
        .await?;

    let service_id = "svc-node-runner";
    connection
        .execute(
            "INSERT INTO services (id, category_id, slug, name, description, docker_image, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)
             ON CONFLICT(id) DO NOTHING",
            params![
                service_id,
                category_id,
                "node-runner",
                "Node Runner",
                "Managed Node.js workload instances",
                "gridkeep/node-runner:latest"
            ],
        )
        .await?;

    let plans = [
        ("plan-free", "free", "Free", 0i64, 50i64, 1i32, 0i64),
        ("plan-basic", "basic", "Basic", 15_000, 200, 2, 1),
        ("plan-pro", "pro", "Pro", 45_000, 500, 5, 5),
        ("plan-premium", "premium", "Premium", 120_000, 1_000, 10, 20),
        ("plan-enterprise", "enterprise", "Enterprise", 400_000, 5_000, 50, 100),
    ];
    for (id, plan_type, name, price, total_quota, max_instances, storage_gb) in plans {
        connection
            .execute(
                "INSERT INTO service_plans
                    (id, service_id, plan_type, name, price, total_quota, max_instances_per_user, storage_gb, active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)
                 ON CONFLICT(id) DO NOTHING",
                params![id, service_id, plan_type, name, price, total_quota, max_instances, storage_gb],
            )
            .await?;
    }

    let admin_id = Uuid::new_v4().to_string();
    connection
        .execute(
            "INSERT INTO users (id, email, role) VALUES (?1, ?2, 'administrator')
             ON CONFLICT(email) DO NOTHING",
            params![admin_id, "admin@gridkeep.local"],
        )
        .await?;

    connection
        .execute(
            "INSERT INTO coupons (id, code, kind, value, max_redemptions, active)
             VALUES (?1, ?2, 'fixed_credit', 10000, 100, 1)
             ON CONFLICT(code) DO NOTHING",
            params!["coupon-welcome10k", "WELCOME10K"],
        )
        .await?;

    info!("seed complete: 1 category, 1 service, 5 plans, 1 admin account, 1 coupon");
    Ok(())
}
