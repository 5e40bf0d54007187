//! Group use cases with a read-through listing cache

use std::sync::Arc;

use crate::domain::entities::group::{Group, MAX_GROUP_NAME_LENGTH};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::GroupRepository;
use crate::services::cache::{CacheStore, GroupCache};

/// Manages a user's ordered groups.
///
/// Listings are cached per user; every write drops only the writer's entry.
/// Cache failures never fail a request.
pub struct GroupService<R, C>
where
    R: GroupRepository + ?Sized,
    C: CacheStore + ?Sized,
{
    repository: Arc<R>,
    cache: GroupCache<C>,
}

impl<R, C> GroupService<R, C>
where
    R: GroupRepository + ?Sized,
    C: CacheStore + ?Sized,
{
    pub fn new(repository: Arc<R>, cache: GroupCache<C>) -> Self {
        Self { repository, cache }
    }

    /// Append a new group to the end of the user's list.
    ///
    /// The name may be empty so a group can be named after it is created.
    pub async fn create_group(&self, user_id: i64, name: &str) -> DomainResult<Group> {
        check_name_length(name)?;
        let group = self.repository.create(user_id, name).await?;
        self.invalidate(user_id).await;

        tracing::debug!(user_id, group_id = group.id, "group created");
        Ok(group)
    }

    /// The user's groups ordered by position
    pub async fn get_user_groups(&self, user_id: i64) -> DomainResult<Vec<Group>> {
        match self.cache.get(user_id).await {
            Ok(Some(groups)) => return Ok(groups),
            Ok(None) => {}
            Err(e) => tracing::warn!(user_id, error = %e, "group cache read failed"),
        }

        let groups = self.repository.list_by_user(user_id).await?;

        if let Err(e) = self.cache.set(user_id, &groups).await {
            tracing::warn!(user_id, error = %e, "group cache write failed");
        }
        Ok(groups)
    }

    pub async fn update_group_name(
        &self,
        group_id: i64,
        user_id: i64,
        name: &str,
    ) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        check_name_length(name)?;
        if !self.repository.update_name(group_id, user_id, name).await? {
            return Err(not_found());
        }
        self.invalidate(user_id).await;
        Ok(())
    }

    /// Move a group. Only the owner's cache entry is dropped.
    pub async fn update_group_position(
        &self,
        group_id: i64,
        user_id: i64,
        position: i32,
    ) -> DomainResult<()> {
        if position < 0 {
            return Err(ValidationError::OutOfRange {
                field: "position".to_string(),
            }
            .into());
        }
        if !self
            .repository
            .update_position(group_id, user_id, position)
            .await?
        {
            return Err(not_found());
        }
        self.invalidate(user_id).await;
        Ok(())
    }

    pub async fn delete_group(&self, group_id: i64, user_id: i64) -> DomainResult<()> {
        if !self.repository.delete(group_id, user_id).await? {
            return Err(not_found());
        }
        self.invalidate(user_id).await;
        Ok(())
    }

    async fn invalidate(&self, user_id: i64) {
        if let Err(e) = self.cache.invalidate(user_id).await {
            tracing::warn!(user_id, error = %e, "group cache invalidation failed");
        }
    }
}

fn check_name_length(name: &str) -> DomainResult<()> {
    if name.chars().count() > MAX_GROUP_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_GROUP_NAME_LENGTH,
        }
        .into());
    }
    Ok(())
}

fn not_found() -> DomainError {
    DomainError::NotFound {
        resource: "Group".to_string(),
    }
}
