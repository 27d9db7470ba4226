// [libs/infra/db-turso/src/repositories/instance.rs]
//! Service instance lifecycle persistence backing the provisioner (C6) and
//! the startup reconciliation sweep.

use crate::errors::DbError;
use crate::mapping::parse_timestamp;
use crate::GatewayClient;
use gridkeep_domain_models::{InstanceStatus, ServiceInstance};
use libsql::{params, Row};
use tracing::instrument;

pub struct InstanceRepository {
    client: GatewayClient,
}

impl InstanceRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, instance_id: &str) -> Result<ServiceInstance, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, subscription_id, user_id, status, pod_name, namespace,
                    subdomain, public_url, ssl_enabled, last_error, created_at, updated_at
                 FROM service_instances WHERE id = ?1",
                params![instance_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Self::map_row(&row),
            None => Err(DbError::InstanceNotFound),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_subscription(&self, subscription_id: &str) -> Result<Option<ServiceInstance>, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, subscription_id, user_id, status, pod_name, namespace,
                    subdomain, public_url, ssl_enabled, last_error, created_at, updated_at
                 FROM service_instances WHERE subscription_id = ?1",
                params![subscription_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Creates the `PENDING` instance row the provisioner will drive to
    /// `RUNNING`. `subdomain`/`public_url`/`ssl_enabled` are computed by the
    /// subscription engine before the instance even has a resource name,
    /// since the manifest generator needs them baked into the config map
    /// (`spec.md` §4.5).
    #[instrument(skip(self))]
    pub async fn create_pending(
        &self,
        subscription_id: &str,
        user_id: &str,
        namespace: &str,
        subdomain: &str,
        public_url: &str,
        ssl_enabled: bool,
    ) -> Result<ServiceInstance, DbError> {
        let connection = self.client.get_connection()?;
        let id = uuid::Uuid::new_v4().to_string();
        connection
            .execute(
                "INSERT INTO service_instances
                    (id, subscription_id, user_id, status, namespace, subdomain, public_url, ssl_enabled)
                 VALUES (?1, ?2, ?3, 'pending', ?4, ?5, ?6, ?7)",
                params![
                    id.clone(),
                    subscription_id,
                    user_id,
                    namespace,
                    subdomain,
                    public_url,
                    ssl_enabled as i64
                ],
            )
            .await?;
        self.find_by_id(&id).await
    }

    #[instrument(skip(self))]
    pub async fn mark_provisioning(&self, instance_id: &str) -> Result<(), DbError> {
        self.guarded_transition(
            instance_id,
            "UPDATE service_instances SET status = 'provisioning', updated_at = CURRENT_TIMESTAMP
             WHERE id = ?1 AND status IN ('pending', 'error')",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn mark_running(&self, instance_id: &str, pod_name: &str) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE service_instances
                 SET status = 'running', pod_name = ?2, updated_at = CURRENT_TIMESTAMP, last_error = NULL
                 WHERE id = ?1 AND status = 'provisioning'",
                params![instance_id, pod_name],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::InvalidTransition);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_error(&self, instance_id: &str, message: &str) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE service_instances SET status = 'error', last_error = ?2, updated_at = CURRENT_TIMESTAMP WHERE id = ?1",
                params![instance_id, message],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::InstanceNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_stopped(&self, instance_id: &str) -> Result<(), DbError> {
        self.guarded_transition(
            instance_id,
            "UPDATE service_instances SET status = 'stopped', updated_at = CURRENT_TIMESTAMP WHERE id = ?1 AND status = 'running'",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn mark_terminated(&self, instance_id: &str) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE service_instances SET status = 'terminated', updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?1 AND status != 'terminated'",
                params![instance_id],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::InstanceNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn touch_reconciled(&self, instance_id: &str) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        connection
            .execute(
                "UPDATE service_instances SET updated_at = CURRENT_TIMESTAMP WHERE id = ?1",
                params![instance_id],
            )
            .await?;
        Ok(())
    }

    /// Instances the startup sweep must re-check: stuck mid-provisioning,
    /// or not touched by the orchestrator in over an hour.
    #[instrument(skip(self))]
    pub async fn needs_reconciliation(&self) -> Result<Vec<ServiceInstance>, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, subscription_id, user_id, status, pod_name, namespace,
                    subdomain, public_url, ssl_enabled, last_error, created_at, updated_at
                 FROM service_instances
                 WHERE status IN ('pending', 'provisioning')
                    OR (status = 'running' AND updated_at <= datetime('now', '-1 hour'))",
                (),
            )
            .await?;
        let mut stale = Vec::new();
        while let Some(row) = rows.next().await? {
            stale.push(Self::map_row(&row)?);
        }
        Ok(stale)
    }

    async fn guarded_transition(&self, instance_id: &str, sql: &str) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection.execute(sql, params![instance_id]).await?;
        if affected == 0 {
            return Err(DbError::InvalidTransition);
        }
        Ok(())
    }

    fn map_row(row: &Row) -> Result<ServiceInstance, DbError> {
        let status_label: String = row.get(3)?;
        Ok(ServiceInstance {
            id: row.get(0)?,
            subscription_id: row.get(1)?,
            user_id: row.get(2)?,
            status: label_to_status(&status_label),
            pod_name: row.get(4)?,
            namespace: row.get(5)?,
            subdomain: row.get(6)?,
            public_url: row.get(7)?,
            ssl_enabled: row.get::<i64>(8)? != 0,
            last_error: row.get(9)?,
            created_at: parse_timestamp(row.get::<String>(10)?)?,
            updated_at: parse_timestamp(row.get::<String>(11)?)?,
        })
    }
}

fn label_to_status(label: &str) -> InstanceStatus {
    match label {
        "provisioning" => InstanceStatus::Provisioning,
        "running" => InstanceStatus::Running,
        "stopped" => InstanceStatus::Stopped,
        "error" => InstanceStatus::Error,
        "terminated" => InstanceStatus::Terminated,
        "maintenance" => InstanceStatus::Maintenance,
        _ => InstanceStatus::Pending,
    }
}
