//! HTTP implementation of the collection store client

use crate::error::ClientError;
use crate::store::CollectionStore;
use crate::types::{List, ListId, NewList, NewUser, User, UserId, UserPatch};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Collection store client backed by reqwest
///
/// Talks to a document store exposing `lists` and `users` collections
/// (json-server shaped). All failures are converted into [`ClientError`];
/// nothing here panics or retries.
#[derive(Clone, Debug)]
pub struct HttpCollectionStore {
    client: Client,
    base_url: String,
}

impl HttpCollectionStore {
    /// Create a client against `base_url` (e.g. `http://localhost:3000`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decode a success body, mapping status failures first
    async fn decode<T: DeserializeOwned>(
        response: Response,
        resource: &'static str,
        id: &str,
    ) -> Result<T, ClientError> {
        let response = Self::check_status(response, resource, id).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
    }

    async fn check_status(
        response: Response,
        resource: &'static str,
        id: &str,
    ) -> Result<Response, ClientError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                resource,
                id: id.to_string(),
            }),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                })
            },
        }
    }
}

#[async_trait]
impl CollectionStore for HttpCollectionStore {
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    async fn lists_for_user(&self, user_id: &UserId) -> Result<Vec<List>, ClientError> {
        let response = self
            .client
            .get(self.url("/lists"))
            .query(&[("userId", user_id.as_str())])
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::decode(response, "lists", user_id.as_str()).await
    }

    #[tracing::instrument(skip(self), fields(list_id = %list_id))]
    async fn list(&self, list_id: &ListId) -> Result<List, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/lists/{list_id}")))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::decode(response, "list", list_id.as_str()).await
    }

    #[tracing::instrument(skip(self, new_list), fields(name = %new_list.name))]
    async fn create_list(&self, new_list: NewList) -> Result<List, ClientError> {
        let response = self
            .client
            .post(self.url("/lists"))
            .json(&new_list)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::decode(response, "list", "(new)").await
    }

    #[tracing::instrument(skip(self, list), fields(list_id = %list.id))]
    async fn replace_list(&self, list: List) -> Result<List, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/lists/{}", list.id)))
            .json(&list)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::decode(response, "list", list.id.as_str()).await
    }

    #[tracing::instrument(skip(self), fields(list_id = %list_id))]
    async fn delete_list(&self, list_id: &ListId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/lists/{list_id}")))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::check_status(response, "list", list_id.as_str()).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, email))]
    async fn users_by_email(&self, email: &str) -> Result<Vec<User>, ClientError> {
        let response = self
            .client
            .get(self.url("/users"))
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::decode(response, "users", email).await
    }

    #[tracing::instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn create_user(&self, new_user: NewUser) -> Result<User, ClientError> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(&new_user)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::decode(response, "user", "(new)").await
    }

    #[tracing::instrument(skip(self, patch), fields(user_id = %user_id))]
    async fn update_user(&self, user_id: &UserId, patch: UserPatch) -> Result<User, ClientError> {
        let response = self
            .client
            .patch(self.url(&format!("/users/{user_id}")))
            .json(&patch)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::decode(response, "user", user_id.as_str()).await
    }
}
