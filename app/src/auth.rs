//! The auth aggregate: login, logout, and profile updates.
//!
//! Login looks the user up by email in the remote `users` collection and
//! compares the password in plaintext. That is the backend's actual
//! contract, preserved as-is; this module adds no security on top of it.

use listkeeper_client::{CollectionStore, User, UserId, UserPatch};
use listkeeper_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// Error message when no user matches the login email
pub const USER_NOT_FOUND: &str = "User not found";

/// Error message when the password does not match
pub const INVALID_PASSWORD: &str = "Invalid password";

/// State of the auth aggregate
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    /// The authenticated user, if any
    pub user: Option<User>,
    /// Whether a session is active
    pub is_authenticated: bool,
    /// Number of remote operations currently running
    pub in_flight: usize,
    /// Message of the most recent failure
    pub error: Option<String>,
}

impl AuthState {
    /// Create an unauthenticated state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Commands and events for the auth aggregate
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    // ========== Commands ==========
    /// Command: Log in with email and password
    Login {
        /// Login email
        email: String,
        /// Plaintext password
        password: String,
    },

    /// Command: End the session
    Logout,

    /// Command: Patch the authenticated user's profile
    UpdateProfile {
        /// Fields to change
        patch: UserPatch,
    },

    // ========== Events ==========
    /// Event: Login succeeded
    LoggedIn {
        /// The matched user document
        user: User,
    },

    /// Event: Login failed
    LoginFailed {
        /// `USER_NOT_FOUND`, `INVALID_PASSWORD`, or a transport message
        message: String,
    },

    /// Event: The session ended
    ///
    /// Emitted through an effect so session-persistence observers see it
    /// on the action broadcast.
    LoggedOut,

    /// Event: The profile patch was written
    ProfileUpdated {
        /// The patched user document
        user: User,
    },

    /// Event: The profile patch failed
    ProfileUpdateFailed {
        /// Human-readable failure message
        message: String,
    },

    /// Event: A stored session was found at boot
    SessionRestored {
        /// The persisted user
        user: User,
    },
}

/// Environment dependencies for the auth reducer
#[derive(Clone)]
pub struct AuthEnvironment {
    /// Remote collection store
    pub store: Arc<dyn CollectionStore>,
}

impl AuthEnvironment {
    /// Creates a new `AuthEnvironment`
    #[must_use]
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    fn login(&self, email: String, password: String) -> Effect<AuthAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            Some(match store.users_by_email(&email).await {
                Ok(users) => match users.into_iter().next() {
                    None => AuthAction::LoginFailed {
                        message: USER_NOT_FOUND.to_string(),
                    },
                    Some(user) if user.password == password => AuthAction::LoggedIn { user },
                    Some(_) => AuthAction::LoginFailed {
                        message: INVALID_PASSWORD.to_string(),
                    },
                },
                Err(e) => AuthAction::LoginFailed {
                    message: e.to_string(),
                },
            })
        }
    }

    fn update_profile(&self, user_id: UserId, patch: UserPatch) -> Effect<AuthAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            Some(match store.update_user(&user_id, patch).await {
                Ok(user) => AuthAction::ProfileUpdated { user },
                Err(e) => AuthAction::ProfileUpdateFailed {
                    message: e.to_string(),
                },
            })
        }
    }
}

/// Reducer for the auth aggregate
#[derive(Clone, Debug, Default)]
pub struct AuthReducer;

impl AuthReducer {
    /// Creates a new `AuthReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            AuthAction::Login { email, password } => {
                state.in_flight += 1;
                smallvec![env.login(email, password)]
            },

            AuthAction::Logout => {
                state.user = None;
                state.is_authenticated = false;
                state.error = None;
                // Re-emit as an event so broadcast observers can clear the
                // persisted session
                smallvec![async_effect! { Some(AuthAction::LoggedOut) }]
            },

            AuthAction::UpdateProfile { patch } => {
                let Some(user) = &state.user else {
                    state.error = Some("Not logged in".to_string());
                    return SmallVec::new();
                };
                state.in_flight += 1;
                smallvec![env.update_profile(user.id.clone(), patch)]
            },

            // ========== Events ==========
            AuthAction::LoggedIn { user } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                tracing::info!(user_id = %user.id, "login succeeded");
                state.user = Some(user);
                state.is_authenticated = true;
                state.error = None;
                SmallVec::new()
            },

            AuthAction::LoginFailed { message } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                tracing::warn!("login failed");
                state.error = Some(message);
                state.is_authenticated = false;
                SmallVec::new()
            },

            AuthAction::LoggedOut => {
                // Idempotent; state was already cleared by the command
                state.user = None;
                state.is_authenticated = false;
                SmallVec::new()
            },

            AuthAction::ProfileUpdated { user } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.user = Some(user);
                state.error = None;
                SmallVec::new()
            },

            AuthAction::ProfileUpdateFailed { message } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.error = Some(message);
                SmallVec::new()
            },

            AuthAction::SessionRestored { user } => {
                tracing::info!(user_id = %user.id, "session restored from storage");
                state.user = Some(user);
                state.is_authenticated = true;
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use listkeeper_client::MemoryCollectionStore;
    use listkeeper_testing::{assertions, ReducerTest};

    fn test_env() -> AuthEnvironment {
        AuthEnvironment::new(Arc::new(MemoryCollectionStore::new()))
    }

    fn user(id: &str) -> User {
        User {
            id: UserId::from(id),
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            cellphone: "555".to_string(),
        }
    }

    #[test]
    fn login_command_launches_lookup() {
        ReducerTest::new(AuthReducer::new())
            .with_env(test_env())
            .given_state(AuthState::new())
            .when_action(AuthAction::Login {
                email: "ada@example.com".to_string(),
                password: "secret".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.in_flight, 1);
                assert!(!state.is_authenticated);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn logged_in_authenticates_and_clears_error() {
        let mut initial = AuthState::new();
        initial.in_flight = 1;
        initial.error = Some(INVALID_PASSWORD.to_string());

        ReducerTest::new(AuthReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(AuthAction::LoggedIn { user: user("u1") })
            .then_state(|state| {
                assert!(state.is_authenticated);
                assert_eq!(state.in_flight, 0);
                assert!(state.error.is_none());
                assert_eq!(state.user.as_ref().map(|u| u.id.clone()), Some(UserId::from("u1")));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn login_failed_records_message_and_stays_unauthenticated() {
        let mut initial = AuthState::new();
        initial.in_flight = 1;

        ReducerTest::new(AuthReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(AuthAction::LoginFailed {
                message: INVALID_PASSWORD.to_string(),
            })
            .then_state(|state| {
                assert!(!state.is_authenticated);
                assert_eq!(state.error.as_deref(), Some(INVALID_PASSWORD));
                assert_eq!(state.in_flight, 0);
            })
            .run();
    }

    #[test]
    fn logout_clears_session_and_emits_event() {
        let mut initial = AuthState::new();
        initial.user = Some(user("u1"));
        initial.is_authenticated = true;

        ReducerTest::new(AuthReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(AuthAction::Logout)
            .then_state(|state| {
                assert!(state.user.is_none());
                assert!(!state.is_authenticated);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn update_profile_without_session_sets_error() {
        ReducerTest::new(AuthReducer::new())
            .with_env(test_env())
            .given_state(AuthState::new())
            .when_action(AuthAction::UpdateProfile {
                patch: UserPatch::default(),
            })
            .then_state(|state| {
                assert_eq!(state.in_flight, 0);
                assert!(state.error.is_some());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn session_restored_seeds_authentication() {
        ReducerTest::new(AuthReducer::new())
            .with_env(test_env())
            .given_state(AuthState::new())
            .when_action(AuthAction::SessionRestored { user: user("u1") })
            .then_state(|state| {
                assert!(state.is_authenticated);
                assert_eq!(state.in_flight, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
