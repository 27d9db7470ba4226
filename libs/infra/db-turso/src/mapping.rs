// [libs/infra/db-turso/src/mapping.rs]
//! Shared row -> domain conversion helpers. SQLite has no native timestamp
//! type; every `DATETIME` column round-trips through libSQL's default
//! `CURRENT_TIMESTAMP` format (`YYYY-MM-DD HH:MM:SS`).

use crate::errors::DbError;
use chrono::{DateTime, NaiveDateTime, Utc};

pub fn parse_timestamp(raw: String) -> Result<DateTime<Utc>, DbError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|error| DbError::MappingError(format!("invalid timestamp '{}': {}", raw, error)))
}

pub fn parse_optional_timestamp(raw: Option<String>) -> Result<Option<DateTime<Utc>>, DbError> {
    raw.map(parse_timestamp).transpose()
}
