//! In-memory implementation of GroupRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::group::Group;
use crate::errors::DomainError;

use super::trait_::GroupRepository;

#[derive(Default)]
struct State {
    groups: BTreeMap<i64, Group>,
    next_id: i64,
}

/// Mock group repository
#[derive(Clone, Default)]
pub struct MockGroupRepository {
    state: Arc<RwLock<State>>,
    list_calls: Arc<AtomicUsize>,
}

impl MockGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `list_by_user` reached the store
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn owned<'a>(state: &'a mut State, id: i64, user_id: i64) -> Option<&'a mut Group> {
        state.groups.get_mut(&id).filter(|g| g.user_id == user_id)
    }
}

#[async_trait]
impl GroupRepository for MockGroupRepository {
    async fn create(&self, user_id: i64, name: &str) -> Result<Group, DomainError> {
        let mut state = self.state.write().await;

        let position = state
            .groups
            .values()
            .filter(|g| g.user_id == user_id)
            .map(|g| g.position)
            .max()
            .map_or(0, |max| max + 1);

        state.next_id += 1;
        let now = Utc::now();
        let group = Group {
            id: state.next_id,
            user_id,
            name: name.to_string(),
            position,
            created_at: now,
            updated_at: now,
        };
        state.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Group>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let state = self.state.read().await;
        let mut groups: Vec<Group> = state
            .groups
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        groups.sort_by_key(|g| (g.position, g.id));
        Ok(groups)
    }

    async fn update_name(&self, id: i64, user_id: i64, name: &str) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(match Self::owned(&mut state, id, user_id) {
            Some(group) => {
                group.name = name.to_string();
                group.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn update_position(
        &self,
        id: i64,
        user_id: i64,
        position: i32,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(match Self::owned(&mut state, id, user_id) {
            Some(group) => {
                group.position = position;
                group.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if Self::owned(&mut state, id, user_id).is_none() {
            return Ok(false);
        }
        Ok(state.groups.remove(&id).is_some())
    }
}
