// [libs/infra/db-turso/src/repositories/catalog.rs]
//! Catalog & quota controller (C3): category/service/plan reads and the
//! transactional quota reservation that backs subscription creation.

use crate::errors::DbError;
use crate::GatewayClient;
use gridkeep_domain_models::{PlanType, Service, ServiceCategory, ServicePlan};
use libsql::{params, Row};
use tracing::instrument;

pub struct CatalogRepository {
    client: GatewayClient,
}

impl CatalogRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<ServiceCategory>, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query("SELECT id, name, description FROM service_categories", ())
            .await?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(ServiceCategory {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            });
        }
        Ok(categories)
    }

    #[instrument(skip(self))]
    pub async fn list_services(&self, category_id: &str) -> Result<Vec<Service>, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, category_id, slug, name, description, docker_image, active
                 FROM services WHERE category_id = ?1",
                params![category_id],
            )
            .await?;
        let mut services = Vec::new();
        while let Some(row) = rows.next().await? {
            services.push(Self::map_service(&row)?);
        }
        Ok(services)
    }

    #[instrument(skip(self))]
    pub async fn find_service(&self, service_id: &str) -> Result<Service, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, category_id, slug, name, description, docker_image, active
                 FROM services WHERE id = ?1",
                params![service_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Self::map_service(&row),
            None => Err(DbError::PlanNotFound),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_plan(&self, plan_id: &str) -> Result<ServicePlan, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, service_id, plan_type, name, price, total_quota, used_quota,
                    max_instances_per_user, storage_gb, active
                 FROM service_plans WHERE id = ?1",
                params![plan_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Self::map_plan(&row),
            None => Err(DbError::PlanNotFound),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_plans_for_service(&self, service_id: &str) -> Result<Vec<ServicePlan>, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, service_id, plan_type, name, price, total_quota, used_quota,
                    max_instances_per_user, storage_gb, active
                 FROM service_plans WHERE service_id = ?1",
                params![service_id],
            )
            .await?;
        let mut plans = Vec::new();
        while let Some(row) = rows.next().await? {
            plans.push(Self::map_plan(&row)?);
        }
        Ok(plans)
    }

    /// Atomically reserves `units` of quota on `plan_id`, guarded by the
    /// same `WHERE used_quota + ?units <= total_quota` predicate the
    /// subscription engine relies on to avoid a check-then-act race.
    #[instrument(skip(self))]
    pub async fn reserve_quota(&self, plan_id: &str, units: i64) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE service_plans
                 SET used_quota = used_quota + ?2
                 WHERE id = ?1 AND used_quota + ?2 <= total_quota",
                params![plan_id, units],
            )
            .await?;

        if affected == 0 {
            return Err(DbError::QuotaExceeded);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn release_quota(&self, plan_id: &str, units: i64) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        connection
            .execute(
                "UPDATE service_plans SET used_quota = MAX(0, used_quota - ?2) WHERE id = ?1",
                params![plan_id, units],
            )
            .await?;
        Ok(())
    }

    /// `spec.md` §4.3 `setTotalQuota`. Caller is responsible for refusing
    /// `new_total < used_quota`; this just writes the column.
    #[instrument(skip(self))]
    pub async fn set_total_quota(&self, plan_id: &str, new_total: i64) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE service_plans SET total_quota = ?2 WHERE id = ?1",
                params![plan_id, new_total],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::PlanNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count_live_instances_for_user_plan(&self, user_id: &str, plan_id: &str) -> Result<i64, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT COUNT(*) FROM service_instances si
                 JOIN subscriptions s ON s.id = si.subscription_id
                 WHERE s.user_id = ?1 AND s.plan_id = ?2
                   AND si.status NOT IN ('terminated', 'error')",
                params![user_id, plan_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(0),
        }
    }

    fn map_plan(row: &Row) -> Result<ServicePlan, DbError> {
        let plan_type_label: String = row.get(2)?;
        Ok(ServicePlan {
            id: row.get(0)?,
            service_id: row.get(1)?,
            plan_type: label_to_plan_type(&plan_type_label),
            name: row.get(3)?,
            price: row.get(4)?,
            total_quota: row.get(5)?,
            used_quota: row.get(6)?,
            max_instances_per_user: row.get(7)?,
            storage_gb: row.get(8)?,
            active: row.get::<i64>(9)? != 0,
        })
    }

    fn map_service(row: &Row) -> Result<Service, DbError> {
        Ok(Service {
            id: row.get(0)?,
            category_id: row.get(1)?,
            slug: row.get(2)?,
            name: row.get(3)?,
            description: row.get(4)?,
            docker_image: row.get(5)?,
            active: row.get::<i64>(6)? != 0,
        })
    }
}

fn label_to_plan_type(label: &str) -> PlanType {
    match label {
        "basic" => PlanType::Basic,
        "pro" => PlanType::Pro,
        "premium" => PlanType::Premium,
        "enterprise" => PlanType::Enterprise,
        _ => PlanType::Free,
    }
}
