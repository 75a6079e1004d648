use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Client, ClientPatch, Phone};
use crate::search::{FindOutcome, SearchCriteria};

/// Database handle shared by every operation
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance connected with the configured limits
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an already connected pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the underlying connections, waiting for them to be released
    pub async fn close(self) {
        self.pool.close().await;
    }

    // Schema
    pub async fn create_tables(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id SERIAL PRIMARY KEY,
                first_name VARCHAR(100) NOT NULL,
                last_name VARCHAR(100) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS phones (
                id SERIAL PRIMARY KEY,
                client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                phone VARCHAR(15) NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("schema ready");

        Ok(())
    }

    // Client operations
    pub async fn add_client(&self, first_name: &str, last_name: &str, email: &str) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO clients (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(self.get_pool())
        .await?;

        info!(id, "client added");
        Ok(id)
    }

    pub async fn get_client(&self, id: i32) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(client)
    }

    /// Apply the present fields of `patch` in a single statement.
    ///
    /// Returns the number of rows changed; 0 when the id is unknown or the
    /// patch carries nothing to write.
    pub async fn update_client(&self, client_id: i32, patch: &ClientPatch) -> Result<u64> {
        let Some((sql, values)) = patch.update_statement() else {
            debug!(client_id, "empty patch, nothing to update");
            return Ok(0);
        };
        debug!(%sql, "updating client");

        let mut query = sqlx::query::<Postgres>(&sql);
        for value in values {
            query = query.bind(value);
        }
        let updated = query.bind(client_id).execute(self.get_pool()).await?.rows_affected();

        info!(client_id, updated, "client updated");
        Ok(updated)
    }

    /// Delete a client; its phones go with it through the cascading key.
    pub async fn delete_client(&self, client_id: i32) -> Result<u64> {
        let deleted = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(self.get_pool())
            .await?
            .rows_affected();

        info!(deleted, "client with ID {client_id} deleted");
        Ok(deleted)
    }

    // Phone operations
    pub async fn add_phone(&self, client_id: i32, phone: &str) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO phones (client_id, phone)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(client_id)
        .bind(phone)
        .fetch_one(self.get_pool())
        .await?;

        info!(id, client_id, "phone added");
        Ok(id)
    }

    pub async fn get_phone(&self, id: i32) -> Result<Option<Phone>> {
        let phone = sqlx::query_as::<_, Phone>(
            "SELECT id, client_id, phone FROM phones WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(phone)
    }

    pub async fn get_phones_by_client(&self, client_id: i32) -> Result<Vec<Phone>> {
        let phones = sqlx::query_as::<_, Phone>(
            "SELECT id, client_id, phone FROM phones WHERE client_id = $1 ORDER BY id ASC",
        )
        .bind(client_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(phones)
    }

    pub async fn delete_phone(&self, phone_id: i32) -> Result<u64> {
        let deleted = sqlx::query("DELETE FROM phones WHERE id = $1")
            .bind(phone_id)
            .execute(self.get_pool())
            .await?
            .rows_affected();

        info!(phone_id, deleted, "phone deleted");
        Ok(deleted)
    }

    // Search
    /// Look up the first client matching `criteria`.
    ///
    /// Never fails: storage errors are logged and reported as
    /// [`FindOutcome::Failed`].
    pub async fn find_client(&self, criteria: &SearchCriteria) -> FindOutcome {
        match self.try_find_client(criteria).await {
            Ok(Some(client)) => FindOutcome::Found(client),
            Ok(None) => FindOutcome::NotFound,
            Err(err) => {
                warn!(error = %err, "client search failed");
                FindOutcome::Failed(err.to_string())
            }
        }
    }

    async fn try_find_client(&self, criteria: &SearchCriteria) -> Result<Option<Client>> {
        let query = criteria.to_query();
        debug!(sql = %query.sql, params = ?query.params, "searching clients");

        let mut select = sqlx::query_as::<Postgres, Client>(&query.sql);
        for param in &query.params {
            select = select.bind(param);
        }

        Ok(select.fetch_optional(self.get_pool()).await?)
    }
}
