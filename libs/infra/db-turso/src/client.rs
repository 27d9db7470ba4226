// [libs/infra/db-turso/src/client.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENCE GATEWAY CLIENT (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DE ENLACES Y TRANSACCIONES ACID
 * =================================================================
 */

use crate::errors::DbError;
use crate::schema::apply_full_schema;
use libsql::{Builder, Connection, Database, Transaction};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Clone)]
pub struct GatewayClient {
    driver: Arc<Database>,
    /// Keeps an in-memory database alive across connections; `None` for
    /// disk-backed or remote databases.
    _memory_anchor: Option<Arc<Connection>>,
}

impl GatewayClient {
    #[instrument(skip(access_token))]
    pub async fn connect(database_url: &str, access_token: Option<String>) -> Result<Self, DbError> {
        if database_url.is_empty() {
            return Err(DbError::ConfigurationError("DATABASE_URL is unset".into()));
        }

        info!("connecting to persistence gateway at [{}]", database_url);

        let is_remote = database_url.starts_with("libsql://") || database_url.starts_with("https://");
        let is_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let driver = if is_remote {
            let token = access_token
                .ok_or_else(|| DbError::ConfigurationError("remote database requires an access token".into()))?;
            Builder::new_remote(database_url.to_string(), token).build().await
        } else {
            Builder::new_local(database_url).build().await
        }
        .map_err(|error| DbError::ConnectionError(error.to_string()))?;

        let driver = Arc::new(driver);
        let mut anchor = None;

        if is_memory {
            let anchor_connection = driver
                .connect()
                .map_err(|error| DbError::ConnectionError(error.to_string()))?;
            apply_full_schema(&anchor_connection)
                .await
                .map_err(|error| DbError::ConfigurationError(error.to_string()))?;
            anchor = Some(Arc::new(anchor_connection));
        } else {
            let bootstrap_connection = driver
                .connect()
                .map_err(|error| DbError::ConnectionError(error.to_string()))?;
            apply_full_schema(&bootstrap_connection)
                .await
                .map_err(|error| DbError::ConfigurationError(error.to_string()))?;
        }

        Ok(Self {
            driver,
            _memory_anchor: anchor,
        })
    }

    pub fn get_connection(&self) -> Result<Connection, DbError> {
        self.driver.connect().map_err(|error| {
            error!("connection allocation failed: {}", error);
            DbError::ConnectionError(error.to_string())
        })
    }

    /// Opens a libSQL transaction and hands it to `body`, which owns it for
    /// the call and must invoke `transaction.commit()` itself once its
    /// statements succeed; dropping the transaction without committing
    /// rolls it back. Available for callers that prefer not to manage the
    /// `connection.transaction()` lifecycle by hand.
    pub async fn with_transaction<F, Fut, T>(&self, body: F) -> Result<T, DbError>
    where
        F: FnOnce(Transaction) -> Fut,
        Fut: Future<Output = Result<T, DbError>>,
    {
        let connection = self.get_connection()?;
        let transaction = connection.transaction().await?;
        let value = body(transaction).await?;
        Ok(value)
    }
}
