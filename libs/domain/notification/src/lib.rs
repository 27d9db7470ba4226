// [libs/domain/notification/src/lib.rs]
/*!
 * =================================================================
 * APARATO: NOTIFICATION ENGINE (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: SEÑALES DE ALERTA DE FACTURACIÓN
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationSeverity {
    Info,
    Warning,
    Critical,
}

/// A signal emitted by the billing scheduler (C8) for a user, independent
/// of whatever downstream channel (email, webhook, in-app) delivers it.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemNotification {
    pub id: String,
    pub user_id: String,
    pub severity: NotificationSeverity,
    pub message_key: String,
    pub subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

impl SystemNotification {
    pub fn low_credit(user_id: String, subscription_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            severity: NotificationSeverity::Warning,
            message_key: "LOW_CREDIT_BALANCE".to_string(),
            subscription_id: Some(subscription_id),
            created_at: Utc::now(),
            is_read: false,
        }
    }

    pub fn grace_period_reminder(user_id: String, subscription_id: String, days_remaining: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            severity: NotificationSeverity::Critical,
            message_key: format!("GRACE_PERIOD_REMINDER_{}_DAYS", days_remaining),
            subscription_id: Some(subscription_id),
            created_at: Utc::now(),
            is_read: false,
        }
    }
}
