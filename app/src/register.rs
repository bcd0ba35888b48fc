//! The register aggregate: account creation.
//!
//! Field-level checks (matching passwords, required fields) belong to the
//! form layer; by the time a `Register` command is dispatched the payload
//! is a well-formed `NewUser` and this reducer only runs the remote write.

use listkeeper_client::{CollectionStore, NewUser, User};
use listkeeper_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// State of the register aggregate
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterState {
    /// Number of remote operations currently running
    pub in_flight: usize,
    /// Message of the most recent failure
    pub error: Option<String>,
    /// Whether the last registration succeeded
    pub success: bool,
}

impl RegisterState {
    /// Create an idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Commands and events for the register aggregate
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterAction {
    /// Command: Create an account
    Register {
        /// Registration payload
        details: NewUser,
    },

    /// Command: Reset the outcome flags, e.g. when re-entering the form
    Reset,

    /// Event: The account was created
    Registered {
        /// The created user document
        user: User,
    },

    /// Event: Account creation failed
    RegisterFailed {
        /// Human-readable failure message
        message: String,
    },
}

/// Environment dependencies for the register reducer
#[derive(Clone)]
pub struct RegisterEnvironment {
    /// Remote collection store
    pub store: Arc<dyn CollectionStore>,
}

impl RegisterEnvironment {
    /// Creates a new `RegisterEnvironment`
    #[must_use]
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    fn register(&self, details: NewUser) -> Effect<RegisterAction> {
        let store = Arc::clone(&self.store);
        async_effect! {
            Some(match store.create_user(details).await {
                Ok(user) => RegisterAction::Registered { user },
                Err(e) => RegisterAction::RegisterFailed {
                    message: e.to_string(),
                },
            })
        }
    }
}

/// Reducer for the register aggregate
#[derive(Clone, Debug, Default)]
pub struct RegisterReducer;

impl RegisterReducer {
    /// Creates a new `RegisterReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for RegisterReducer {
    type State = RegisterState;
    type Action = RegisterAction;
    type Environment = RegisterEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RegisterAction::Register { details } => {
                state.in_flight += 1;
                state.success = false;
                smallvec![env.register(details)]
            },

            RegisterAction::Reset => {
                state.error = None;
                state.success = false;
                SmallVec::new()
            },

            RegisterAction::Registered { user } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                tracing::info!(user_id = %user.id, "registration succeeded");
                state.success = true;
                state.error = None;
                SmallVec::new()
            },

            RegisterAction::RegisterFailed { message } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                tracing::warn!("registration failed");
                state.error = Some(message);
                state.success = false;
                SmallVec::new()
            },
        }
    }
}
