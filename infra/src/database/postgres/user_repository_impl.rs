//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use ato_core::domain::entities::user::{NewUser, User};
use ato_core::errors::DomainError;
use ato_core::repositories::UserRepository;

use super::is_unique_violation;
use crate::InfrastructureError;

const USER_COLUMNS: &str = "id, email, password_hash, name, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        Ok(User {
            id: row.try_get("id").map_err(InfrastructureError::from)?,
            email: row.try_get("email").map_err(InfrastructureError::from)?,
            password_hash: row.try_get("password_hash").map_err(InfrastructureError::from)?,
            name: row.try_get("name").map_err(InfrastructureError::from)?,
            created_at: row.try_get("created_at").map_err(InfrastructureError::from)?,
            updated_at: row.try_get("updated_at").map_err(InfrastructureError::from)?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::DuplicateKey {
                        resource: "user".to_string(),
                    }
                } else {
                    InfrastructureError::Database(e).into()
                }
            })?;

        Self::row_to_user(&row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1 LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1 LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}
