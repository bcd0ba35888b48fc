//! In-memory implementation of the collection store
//!
//! Behaves like the HTTP store against a json-server backend: sequential
//! numeric ids for created documents, not-found on missing ids, full
//! document replacement on PUT. Used by tests and the demo binary.

use crate::error::ClientError;
use crate::store::CollectionStore;
use crate::types::{List, ListId, NewList, NewUser, User, UserId, UserPatch};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Collection store backed by in-memory maps
#[derive(Debug, Default)]
pub struct MemoryCollectionStore {
    lists: RwLock<HashMap<ListId, List>>,
    users: RwLock<HashMap<UserId, User>>,
    next_id: AtomicU64,
}

impl MemoryCollectionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id(&self) -> String {
        (self.next_id.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }

    /// Insert a user document directly (test seeding)
    pub async fn seed_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// Insert a list document directly (test seeding)
    pub async fn seed_list(&self, list: List) {
        self.lists.write().await.insert(list.id.clone(), list);
    }

    /// Number of stored lists
    pub async fn list_count(&self) -> usize {
        self.lists.read().await.len()
    }
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
    async fn lists_for_user(&self, user_id: &UserId) -> Result<Vec<List>, ClientError> {
        let lists = self.lists.read().await;
        Ok(lists
            .values()
            .filter(|list| &list.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list(&self, list_id: &ListId) -> Result<List, ClientError> {
        let lists = self.lists.read().await;
        lists.get(list_id).cloned().ok_or_else(|| ClientError::NotFound {
            resource: "list",
            id: list_id.to_string(),
        })
    }

    async fn create_list(&self, new_list: NewList) -> Result<List, ClientError> {
        let list = new_list.into_list(ListId::new(self.mint_id()));
        self.lists.write().await.insert(list.id.clone(), list.clone());
        Ok(list)
    }

    async fn replace_list(&self, list: List) -> Result<List, ClientError> {
        let mut lists = self.lists.write().await;
        if !lists.contains_key(&list.id) {
            return Err(ClientError::NotFound {
                resource: "list",
                id: list.id.to_string(),
            });
        }
        lists.insert(list.id.clone(), list.clone());
        Ok(list)
    }

    async fn delete_list(&self, list_id: &ListId) -> Result<(), ClientError> {
        let mut lists = self.lists.write().await;
        if lists.remove(list_id).is_none() {
            return Err(ClientError::NotFound {
                resource: "list",
                id: list_id.to_string(),
            });
        }
        Ok(())
    }

    async fn users_by_email(&self, email: &str) -> Result<Vec<User>, ClientError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|user| user.email == email)
            .cloned()
            .collect())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, ClientError> {
        let user = User {
            id: UserId::new(self.mint_id()),
            name: new_user.name,
            surname: new_user.surname,
            email: new_user.email,
            password: new_user.password,
            cellphone: new_user.cellphone,
        };
        self.users.write().await.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, user_id: &UserId, patch: UserPatch) -> Result<User, ClientError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(user_id) else {
            return Err(ClientError::NotFound {
                resource: "user",
                id: user_id.to_string(),
            });
        };
        patch.apply_to(user);
        Ok(user.clone())
    }
}
