// [libs/domain/models-rs/src/catalog.rs]
//! Three-level product catalog: category -> service -> plan.

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Ordinal plan tier. Comparisons (`PlanType::Pro > PlanType::Basic`) are
/// relied on by the subscription engine to decide upgrade vs. downgrade.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlanType {
    Free,
    Basic,
    Pro,
    Premium,
    Enterprise,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub category_id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub docker_image: String,
    pub active: bool,
}

/// A purchasable offering within a `Service`. `used_quota` is maintained by
/// `gridkeep-infra-db::repositories::CatalogRepository` and must never
/// exceed `total_quota` (enforced at the repository, not here).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePlan {
    pub id: String,
    pub service_id: String,
    pub plan_type: PlanType,
    pub name: String,
    pub price: i64,
    pub total_quota: i64,
    pub used_quota: i64,
    pub max_instances_per_user: i32,
    pub storage_gb: i64,
    pub active: bool,
}

impl ServicePlan {
    pub fn remaining_quota(&self) -> i64 {
        self.total_quota - self.used_quota
    }

    pub fn has_capacity(&self, requested: i64) -> bool {
        self.remaining_quota() >= requested
    }
}
