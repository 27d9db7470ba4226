// [apps/control-plane/src/bin/migrator.rs]
//! Idempotent schema application CLI. Safe to re-run against a live
//! database: `schema::apply_full_schema` tolerates a table or column
//! already existing.

use dotenvy::dotenv;
use gridkeep_infra_db::schema::apply_full_schema;
use gridkeep_infra_db::GatewayClient;
use gridkeep_shared_beacon::init_tracing;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing("gridkeep-migrator");

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(async {
        info!("applying control-plane schema");

        let database_url =
            std::env::var("DATABASE_URL").expect("FATAL: DATABASE_URL is not set");
        let database_token = std::env::var("TURSO_AUTH_TOKEN").ok();

        let client = GatewayClient::connect(&database_url, database_token)
            .await
            .map_err(|error| anyhow::anyhow!(error))?;
        let connection = client
            .get_connection()
            .map_err(|error| anyhow::anyhow!(error))?;

        match apply_full_schema(&connection).await {
            Ok(()) => {
                info!("schema synchronized");
                Ok(())
            }
            Err(error) => {
                error!(%error, "schema migration failed");
                std::process::exit(1);
            }
        }
    })
}
