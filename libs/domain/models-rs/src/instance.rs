// [libs/domain/models-rs/src/instance.rs]
//! Provisioned workload state, as tracked against the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InstanceStatus {
    Pending,
    Provisioning,
    Running,
    Stopped,
    Error,
    Terminated,
    Maintenance,
}

/// A concrete running (or about-to-run) workload backing a `Subscription`.
/// `pod_name` is refreshed by the provisioner's reconciliation sweep and can
/// legitimately be `None` while `status` is `Pending`.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub id: String,
    pub subscription_id: String,
    pub user_id: String,
    pub status: InstanceStatus,
    pub pod_name: Option<String>,
    pub namespace: String,
    pub subdomain: String,
    pub public_url: String,
    pub ssl_enabled: bool,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceInstance {
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            InstanceStatus::Running | InstanceStatus::Provisioning
        )
    }

    pub fn needs_reconciliation(&self, stale_after: chrono::Duration, now: DateTime<Utc>) -> bool {
        matches!(
            self.status,
            InstanceStatus::Pending | InstanceStatus::Provisioning
        ) && now - self.updated_at > stale_after
    }
}
