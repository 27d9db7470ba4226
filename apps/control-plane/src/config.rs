// [apps/control-plane/src/config.rs]
//! Runtime configuration, parsed once at boot into an immutable struct and
//! handed into `AppState`. Nothing here is re-read per request.

use std::env;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub zone: String,
    pub database_url: String,
    pub database_token: Option<String>,
    pub orchestrator_base_url: String,
    pub orchestrator_token: Option<String>,
    pub webhook_secret: String,
    pub grace_period_days: i64,
    pub suspension_to_expiry_days: i64,
    pub listening_port: u16,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self {
            zone: env::var("ZONE").unwrap_or_else(|_| "gridkeep.local".to_string()),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL is not set"),
            database_token: env::var("TURSO_AUTH_TOKEN").ok(),
            orchestrator_base_url: env::var("ORCHESTRATOR_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            orchestrator_token: env::var("ORCHESTRATOR_TOKEN").ok(),
            webhook_secret: env::var("PAYMENT_WEBHOOK_SECRET").unwrap_or_default(),
            grace_period_days: parse_bounded("GRACE_PERIOD_DAYS", 7, 1, 30),
            suspension_to_expiry_days: parse_bounded("SUSPENSION_TO_EXPIRY_DAYS", 14, 1, 90),
            listening_port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        }
    }
}

fn parse_bounded(key: &str, default: i64, min: i64, max: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(|value| value.clamp(min, max))
        .unwrap_or(default)
}
