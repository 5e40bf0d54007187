//! Unit tests for the group service

use std::sync::Arc;
use std::time::Duration;

use crate::errors::{DomainError, ValidationError};
use crate::repositories::MockGroupRepository;
use crate::services::cache::{CacheStore, GroupCache, InMemoryCacheStore};
use crate::services::group::GroupService;

struct Harness {
    service: GroupService<MockGroupRepository, InMemoryCacheStore>,
    repo: Arc<MockGroupRepository>,
    store: Arc<InMemoryCacheStore>,
}

fn harness() -> Harness {
    let repo = Arc::new(MockGroupRepository::new());
    let store = Arc::new(InMemoryCacheStore::new());
    Harness {
        service: GroupService::new(repo.clone(), GroupCache::new(store.clone())),
        repo,
        store,
    }
}

#[tokio::test]
async fn test_listing_is_read_through_cached() {
    let h = harness();
    h.service.create_group(1, "Inbox").await.unwrap();

    let first = h.service.get_user_groups(1).await.unwrap();
    let second = h.service.get_user_groups(1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(h.repo.list_calls(), 1);
    assert!(h.store.ttl("groups:user:1").await.unwrap() > Duration::from_secs(3500));
}

#[tokio::test]
async fn test_create_appends_and_invalidates() {
    let h = harness();
    h.service.create_group(1, "Inbox").await.unwrap();
    assert_eq!(h.service.get_user_groups(1).await.unwrap().len(), 1);

    let group = h.service.create_group(1, "Work").await.unwrap();
    assert_eq!(group.name, "Work");
    assert_eq!(group.position, 1);

    let groups = h.service.get_user_groups(1).await.unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(h.repo.list_calls(), 2);
}

#[tokio::test]
async fn test_position_update_only_invalidates_owner() {
    let h = harness();
    let mine = h.service.create_group(1, "A").await.unwrap();
    h.service.create_group(2, "B").await.unwrap();

    h.service.get_user_groups(1).await.unwrap();
    h.service.get_user_groups(2).await.unwrap();

    h.service.update_group_position(mine.id, 1, 4).await.unwrap();

    assert!(h.store.get("groups:user:1").await.unwrap().is_none());
    assert!(h.store.get("groups:user:2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_rename_and_delete() {
    let h = harness();
    let group = h.service.create_group(1, "Old").await.unwrap();

    h.service.update_group_name(group.id, 1, "New").await.unwrap();
    assert_eq!(h.service.get_user_groups(1).await.unwrap()[0].name, "New");

    h.service.delete_group(group.id, 1).await.unwrap();
    assert!(h.service.get_user_groups(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_foreign_or_missing_group_is_not_found() {
    let h = harness();
    let group = h.service.create_group(1, "Mine").await.unwrap();

    for result in [
        h.service.update_group_name(group.id, 2, "x").await,
        h.service.update_group_position(group.id, 2, 0).await,
        h.service.delete_group(group.id, 2).await,
        h.service.delete_group(999, 1).await,
    ] {
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}

#[tokio::test]
async fn test_validation() {
    let h = harness();

    let err = h.service.create_group(1, &"x".repeat(256)).await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::TooLong { .. })));

    let group = h.service.create_group(1, "ok").await.unwrap();
    let err = h.service.update_group_name(group.id, 1, "   ").await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::RequiredField { .. })));
    let err = h
        .service
        .update_group_name(group.id, 1, &"x".repeat(256))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::TooLong { .. })));

    let err = h.service.update_group_position(group.id, 1, -1).await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::OutOfRange { .. })));
}

#[tokio::test]
async fn test_cache_failures_do_not_fail_requests() {
    let h = harness();
    h.store.fail_writes(true);

    h.service.create_group(1, "Inbox").await.unwrap();
    assert_eq!(h.service.get_user_groups(1).await.unwrap().len(), 1);
    assert_eq!(h.service.get_user_groups(1).await.unwrap().len(), 1);
    assert_eq!(h.repo.list_calls(), 2);
}

#[tokio::test]
async fn test_create_allows_blank_name() {
    let h = harness();

    let untitled = h.service.create_group(1, "").await.unwrap();
    assert_eq!(untitled.name, "");
    assert_eq!(untitled.position, 0);

    let spaces = h.service.create_group(1, "   ").await.unwrap();
    assert_eq!(spaces.position, 1);

    h.service.update_group_name(untitled.id, 1, "Later").await.unwrap();
    let groups = h.service.get_user_groups(1).await.unwrap();
    assert_eq!(groups[0].name, "Later");
}

#[tokio::test]
async fn test_names_are_stored_as_given() {
    let h = harness();

    let group = h.service.create_group(1, "  Work ").await.unwrap();
    assert_eq!(group.name, "  Work ");

    h.service.update_group_name(group.id, 1, " Home  ").await.unwrap();
    let groups = h.service.get_user_groups(1).await.unwrap();
    assert_eq!(groups[0].name, " Home  ");
}
