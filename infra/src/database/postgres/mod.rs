//! PostgreSQL repository implementations

mod group_repository_impl;
mod user_repository_impl;

pub use group_repository_impl::PgGroupRepository;
pub use user_repository_impl::PgUserRepository;

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}
