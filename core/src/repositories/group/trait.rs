//! Group repository trait.

use async_trait::async_trait;

use crate::domain::entities::group::Group;
use crate::errors::DomainError;

/// Persistence for per-user ordered groups.
///
/// Every write is scoped by owner: a group id belonging to another user
/// behaves exactly like a missing one.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Insert a group at the end of the user's list (`max(position) + 1`, starting at 0)
    async fn create(&self, user_id: i64, name: &str) -> Result<Group, DomainError>;

    /// All groups owned by the user, ordered by position
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Group>, DomainError>;

    /// Rename a group. Returns `false` when no owned group matched.
    async fn update_name(&self, id: i64, user_id: i64, name: &str) -> Result<bool, DomainError>;

    /// Move a group. Returns `false` when no owned group matched.
    async fn update_position(
        &self,
        id: i64,
        user_id: i64,
        position: i32,
    ) -> Result<bool, DomainError>;

    /// Delete a group. Returns `false` when no owned group matched.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, DomainError>;
}
