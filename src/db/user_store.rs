use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::user::User,
};

/// Storage operations behind the user endpoints. Each call is one statement.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the generated id
    async fn create(&self, name: Option<String>) -> Result<i32>;

    /// Users whose `deleted_at` is NULL
    async fn list_active(&self) -> Result<Vec<User>>;

    /// Stamp `deleted_at` with the server time; returns the affected row count.
    /// The id is bound exactly as received so the database applies its own coercion.
    async fn soft_delete(&self, id: &str) -> Result<u64>;

    /// Users whose `deleted_at` is set
    async fn list_deleted(&self) -> Result<Vec<User>>;
}

/// User store for database operations
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    /// Create a new UserStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, name: Option<String>) -> Result<i32> {
        let result = sqlx::query("INSERT INTO users (name) VALUES (?)")
            .bind(&name)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let id = i32::try_from(result.last_insert_id())
            .map_err(|_| AppError::Internal("generated id out of range".into()))?;
        tracing::debug!(id, "Created user");

        Ok(id)
    }

    async fn list_active(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, deleted_at FROM users WHERE deleted_at IS NULL",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(users)
    }

    async fn soft_delete(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }

    async fn list_deleted(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, deleted_at FROM users WHERE deleted_at IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(users)
    }
}
