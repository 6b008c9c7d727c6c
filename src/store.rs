//! In-memory user store.
//!
//! The store is the sole owner of all [`User`] records for the lifetime of
//! the process. Nothing is persisted; a restart starts from empty.
//!
//! # Thread Safety
//!
//! All records live behind a single `tokio::sync::RwLock`. Reads share the
//! lock; every mutation holds the write lock for its entire
//! read-modify-write, so id assignment plus append, lookup plus overwrite,
//! and lookup plus removal are each atomic with respect to concurrent
//! requests. Handlers only ever receive clones.
//!
//! # Id Assignment
//!
//! Ids come from a high-water mark: the next id is one more than the
//! largest id ever issued (1 for a fresh store). It matches
//! `max(existing ids) + 1` until the newest record is deleted, and unlike
//! that formula it never hands a deleted id out again.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::trace;

use crate::error::{AppError, AppResult};
use crate::metrics;
use crate::models::{NewUser, User, UserId};

#[derive(Debug, Default)]
struct StoreInner {
    users: Vec<User>,
    /// Largest id ever issued (0 = none yet)
    high_water: UserId,
}

/// Shared handle to the user collection. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated user, assigning the next id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the id space is exhausted.
    pub async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        let id = inner
            .high_water
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("user id space exhausted".to_string()))?;

        let user = User {
            id,
            user_name: new_user.user_name,
            user_age: new_user.user_age,
        };
        inner.high_water = id;
        inner.users.push(user.clone());
        metrics::record_users_stored(inner.users.len());

        trace!(id, "User appended to store");
        Ok(user)
    }

    /// All users in insertion order.
    pub async fn list(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    /// First user with the given id.
    pub async fn get(&self, id: UserId) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Overwrite name and age of an existing user. The id never changes.
    ///
    /// Returns the updated record, or `None` if no user has this id.
    pub async fn update(&self, id: UserId, new_user: NewUser) -> Option<User> {
        let mut inner = self.inner.write().await;

        let user = inner.users.iter_mut().find(|u| u.id == id)?;
        user.user_name = new_user.user_name;
        user.user_age = new_user.user_age;

        trace!(id, "User updated in store");
        Some(user.clone())
    }

    /// Remove a user permanently.
    ///
    /// Returns the removed record, or `None` if no user has this id.
    pub async fn remove(&self, id: UserId) -> Option<User> {
        let mut inner = self.inner.write().await;

        let position = inner.users.iter().position(|u| u.id == id)?;
        let removed = inner.users.remove(position);
        metrics::record_users_stored(inner.users.len());

        trace!(id, "User removed from store");
        Some(removed)
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn new_user(name: &str, age: i32) -> NewUser {
        NewUser {
            user_name: name.to_string(),
            user_age: age,
        }
    }

    #[tokio::test]
    async fn test_first_id_is_one() {
        let store = UserStore::new();
        let user = store.insert(new_user("Alice", 30)).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.user_name, "Alice");
        assert_eq!(user.user_age, 30);
    }

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let store = UserStore::new();
        let mut last = 0;
        for i in 0..10 {
            let user = store.insert(new_user("User", 20 + i)).await.unwrap();
            assert!(user.id > last);
            last = user.id;
        }
        assert_eq!(store.len().await, 10);
    }

    #[tokio::test]
    async fn test_deleted_max_id_is_not_reused() {
        let store = UserStore::new();
        store.insert(new_user("Alice", 30)).await.unwrap();
        let bob = store.insert(new_user("Bob", 25)).await.unwrap();

        store.remove(bob.id).await.unwrap();
        let carol = store.insert(new_user("Carol", 41)).await.unwrap();

        assert_eq!(carol.id, 3);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = UserStore::new();
        for name in ["a", "b", "c"] {
            store.insert(new_user(name, 1)).await.unwrap();
        }

        let names: Vec<_> = store
            .list()
            .await
            .into_iter()
            .map(|u| u.user_name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = UserStore::new();
        assert!(store.get(1).await.is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let store = UserStore::new();
        let alice = store.insert(new_user("Alice", 30)).await.unwrap();

        let updated = store
            .update(alice.id, new_user("Alicia", 31))
            .await
            .unwrap();

        assert_eq!(updated.id, alice.id);
        assert_eq!(store.get(alice.id).await, Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_untouched() {
        let store = UserStore::new();
        store.insert(new_user("Alice", 30)).await.unwrap();
        let before = store.list().await;

        assert!(store.update(99, new_user("Ghost", 1)).await.is_none());
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn test_remove_twice() {
        let store = UserStore::new();
        let alice = store.insert(new_user("Alice", 30)).await.unwrap();

        assert_eq!(store.remove(alice.id).await, Some(alice.clone()));
        assert!(store.remove(alice.id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_id_space_exhaustion_is_an_error() {
        let store = UserStore::new();
        store.inner.write().await.high_water = UserId::MAX;

        let result = store.insert(new_user("Late", 1)).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_get_unique_ids() {
        let store = UserStore::new();
        let mut handles = Vec::new();
        for i in 0..64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(new_user("Concurrent", i + 1)).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 64);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&64));
    }
}
