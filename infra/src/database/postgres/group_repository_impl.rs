//! PostgreSQL implementation of the GroupRepository trait.
//!
//! Every mutation is scoped by `user_id`, so a foreign group id affects no rows.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use ato_core::domain::entities::group::Group;
use ato_core::errors::DomainError;
use ato_core::repositories::GroupRepository;

use crate::InfrastructureError;

/// PostgreSQL implementation of GroupRepository
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_group(row: &PgRow) -> Result<Group, DomainError> {
        Ok(Group {
            id: row.try_get("id").map_err(InfrastructureError::from)?,
            user_id: row.try_get("user_id").map_err(InfrastructureError::from)?,
            name: row.try_get("name").map_err(InfrastructureError::from)?,
            position: row.try_get("position").map_err(InfrastructureError::from)?,
            created_at: row.try_get("created_at").map_err(InfrastructureError::from)?,
            updated_at: row.try_get("updated_at").map_err(InfrastructureError::from)?,
        })
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn create(&self, user_id: i64, name: &str) -> Result<Group, DomainError> {
        // New groups go to the end of the user's list
        let query = r#"
            INSERT INTO groups (user_id, name, position)
            SELECT $1, $2, COALESCE(MAX(position), -1) + 1
            FROM groups
            WHERE user_id = $1
            RETURNING id, user_id, name, position, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        Self::row_to_group(&row)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Group>, DomainError> {
        let query = r#"
            SELECT id, user_id, name, position, created_at, updated_at
            FROM groups
            WHERE user_id = $1
            ORDER BY position ASC, id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        rows.iter().map(Self::row_to_group).collect()
    }

    async fn update_name(&self, id: i64, user_id: i64, name: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE groups SET name = $1, updated_at = NOW() WHERE id = $2 AND user_id = $3",
        )
        .bind(name)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(InfrastructureError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_position(
        &self,
        id: i64,
        user_id: i64,
        position: i32,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE groups SET position = $1, updated_at = NOW() WHERE id = $2 AND user_id = $3",
        )
        .bind(position)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(InfrastructureError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
