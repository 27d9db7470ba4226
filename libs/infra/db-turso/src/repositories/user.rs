// [libs/infra/db-turso/src/repositories/user.rs]
//! User account access.

use crate::errors::DbError;
use crate::mapping::parse_timestamp;
use crate::GatewayClient;
use gridkeep_domain_models::{User, UserRole};
use libsql::{params, Row};
use tracing::instrument;

pub struct UserRepository {
    client: GatewayClient,
}

impl UserRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, user_id: &str) -> Result<User, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, email, role, credit_balance, total_top_up, total_spent, active, created_at
                 FROM users WHERE id = ?1",
                params![user_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Self::map_row(&row),
            None => Err(DbError::UserNotFound),
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, email: &str, role: UserRole) -> Result<User, DbError> {
        let connection = self.client.get_connection()?;
        let id = uuid::Uuid::new_v4().to_string();
        let role_label = role_to_label(role);

        connection
            .execute(
                "INSERT INTO users (id, email, role) VALUES (?1, ?2, ?3)",
                params![id.clone(), email, role_label],
            )
            .await?;

        self.find_by_id(&id).await
    }

    #[instrument(skip(self))]
    pub async fn set_active(&self, user_id: &str, active: bool) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection
            .execute(
                "UPDATE users SET active = ?2 WHERE id = ?1",
                params![user_id, active as i64],
            )
            .await?;

        if affected == 0 {
            return Err(DbError::UserNotFound);
        }
        Ok(())
    }

    /// Admin listing (`spec.md` §6 `/admin/users`). No filtering beyond
    /// pagination; role/active filters live client-side for now.
    #[instrument(skip(self))]
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<User>, DbError> {
        let connection = self.client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT id, email, role, credit_balance, total_top_up, total_spent, active, created_at
                 FROM users ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
                params![limit, offset],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(Self::map_row(&row)?);
        }
        Ok(users)
    }

    fn map_row(row: &Row) -> Result<User, DbError> {
        let role_label: String = row.get(2)?;
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            role: label_to_role(&role_label),
            credit_balance: row.get(3)?,
            total_top_up: row.get(4)?,
            total_spent: row.get(5)?,
            active: row.get::<i64>(6)? != 0,
            created_at: parse_timestamp(row.get::<String>(7)?)?,
        })
    }
}

fn role_to_label(role: UserRole) -> &'static str {
    match role {
        UserRole::User => "user",
        UserRole::Administrator => "administrator",
    }
}

fn label_to_role(label: &str) -> UserRole {
    match label {
        "administrator" => UserRole::Administrator,
        _ => UserRole::User,
    }
}
