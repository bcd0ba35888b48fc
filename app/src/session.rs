//! Session persistence.
//!
//! The authenticated user is persisted as a single serialized document
//! under a fixed key. The reducer never touches storage: persistence is a
//! subscription adapter that observes the auth store's broadcast actions
//! and writes through the [`SessionStore`] trait. On boot,
//! [`restore_session`] turns a stored session into a `SessionRestored`
//! action for the caller to dispatch before any network call.

use crate::auth::{AuthAction, AuthEnvironment, AuthReducer, AuthState};
use async_trait::async_trait;
use listkeeper_client::User;
use listkeeper_runtime::Store;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

/// File name the session is stored under
pub const SESSION_FILE: &str = "login_state.json";

/// Errors that can occur reading or writing the persisted session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Storage could not be read or written
    #[error("Session storage failed: {0}")]
    Io(#[from] std::io::Error),

    /// The session payload could not be serialized
    #[error("Session serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for the authenticated session
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Load the stored session, if any
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when storage cannot be read. An unparsable
    /// payload is treated as no session, not an error.
    async fn load(&self) -> Result<Option<User>, SessionError>;

    /// Persist `user` as the current session
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when storage cannot be written.
    async fn save(&self, user: &User) -> Result<(), SessionError>;

    /// Remove the stored session
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when storage cannot be written. Clearing
    /// an absent session is not an error.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session store backed by a JSON file in a directory
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store writing `login_state.json` inside `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<User>, SessionError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "stored session unparsable, ignoring");
                Ok(None)
            },
        }
    }

    async fn save(&self, user: &User) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec(user)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session store for tests and demos
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<User>>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<User>, SessionError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, user: &User) -> Result<(), SessionError> {
        *self.slot.write().await = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.slot.write().await = None;
        Ok(())
    }
}

/// The auth store type the persistence adapter attaches to
pub type AuthStore = Store<AuthState, AuthAction, AuthEnvironment, AuthReducer>;

/// Subscription adapter persisting the session on auth events
///
/// Saves on `LoggedIn` and `ProfileUpdated`, clears on `LoggedOut`. The
/// task ends when the store's broadcast channel closes.
pub struct SessionPersistence;

impl SessionPersistence {
    /// Attach to `store` and persist through `session`
    pub fn attach(store: &AuthStore, session: Arc<dyn SessionStore>) -> tokio::task::JoinHandle<()> {
        let mut rx = store.subscribe_actions();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(AuthAction::LoggedIn { user } | AuthAction::ProfileUpdated { user }) => {
                        if let Err(e) = session.save(&user).await {
                            tracing::error!(error = %e, "failed to persist session");
                        }
                    },
                    Ok(AuthAction::LoggedOut) => {
                        if let Err(e) = session.clear().await {
                            tracing::error!(error = %e, "failed to clear persisted session");
                        }
                    },
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "session persistence lagged behind actions");
                    },
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

/// Turn a stored session into the action that seeds auth state
///
/// Returns `None` when no session is stored.
///
/// # Errors
///
/// Returns [`SessionError`] when storage cannot be read.
pub async fn restore_session(
    session: &dyn SessionStore,
) -> Result<Option<AuthAction>, SessionError> {
    Ok(session
        .load()
        .await?
        .map(|user| AuthAction::SessionRestored { user }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use listkeeper_client::UserId;

    fn user() -> User {
        User {
            id: UserId::from("u1"),
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            cellphone: "555".to_string(),
        }
    }

    #[tokio::test]
    async fn file_store_round_trips_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        assert!(store.load().await.unwrap().is_none());

        store.save(&user()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(user()));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clearing_absent_session_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn unparsable_session_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(SESSION_FILE), b"not json")
            .await
            .unwrap();

        let store = FileSessionStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_store_round_trips_session() {
        let store = MemorySessionStore::new();
        store.save(&user()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(user()));
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn restore_session_maps_to_action() {
        let store = MemorySessionStore::new();
        assert!(restore_session(&store).await.unwrap().is_none());

        store.save(&user()).await.unwrap();
        let action = restore_session(&store).await.unwrap();
        assert_eq!(action, Some(AuthAction::SessionRestored { user: user() }));
    }
}
