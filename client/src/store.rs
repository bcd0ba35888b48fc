//! The `CollectionStore` trait
//!
//! Abstracts the remote document store behind a dyn-usable async trait so
//! the synchronization layer can be driven against the HTTP implementation
//! in production and the in-memory implementation in tests and demos.

use crate::error::ClientError;
use crate::types::{List, ListId, NewList, NewUser, User, UserId, UserPatch};
use async_trait::async_trait;

/// Remote collection store operations
///
/// One method per REST endpoint the backend exposes. There is no endpoint
/// for appending a single item to a list: item-level mutations are
/// performed by callers as read-modify-write of the whole list document
/// (`list` followed by `replace_list`).
#[async_trait]
pub trait CollectionStore: Send + Sync + 'static {
    /// `GET /lists?userId={id}` - all lists owned by a user
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    async fn lists_for_user(&self, user_id: &UserId) -> Result<Vec<List>, ClientError>;

    /// `GET /lists/{id}` - a single list document
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the list does not exist;
    /// absence is a failure, never an empty success.
    async fn list(&self, list_id: &ListId) -> Result<List, ClientError>;

    /// `POST /lists` - create a list; the store assigns the id
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    async fn create_list(&self, new_list: NewList) -> Result<List, ClientError>;

    /// `PUT /lists/{id}` - full replacement of a list document
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the list vanished between the
    /// read and this write.
    async fn replace_list(&self, list: List) -> Result<List, ClientError>;

    /// `DELETE /lists/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the list does not exist.
    async fn delete_list(&self, list_id: &ListId) -> Result<(), ClientError>;

    /// `GET /users?email={email}` - login lookup
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    async fn users_by_email(&self, email: &str) -> Result<Vec<User>, ClientError>;

    /// `POST /users` - registration
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    async fn create_user(&self, new_user: NewUser) -> Result<User, ClientError>;

    /// `PATCH /users/{id}` - profile update
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the user does not exist.
    async fn update_user(&self, user_id: &UserId, patch: UserPatch) -> Result<User, ClientError>;
}
