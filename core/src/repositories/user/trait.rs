//! User repository trait defining the interface for credential storage.
//!
//! Lookups return `Ok(None)` for a missing user; only connectivity and
//! constraint failures are errors.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ato_core::repositories::UserRepository;
/// use ato_core::domain::entities::user::{NewUser, User};
/// use ato_core::errors::DomainError;
///
/// struct PgUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PgUserRepository {
///     async fn create(&self, user: NewUser) -> Result<User, DomainError> {
///         unimplemented!()
///     }
///
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its assigned id and timestamps
    /// * `Err(DomainError::DuplicateKey)` - The email is already registered
    /// * `Err(DomainError)` - Database or other error occurred
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Find a user by exact email match
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
}
