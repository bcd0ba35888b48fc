//! # Listkeeper
//!
//! Shopping-list domain state built on the listkeeper reducer/effect
//! architecture. Users register, log in, create named lists, and manage
//! grocery items within them; every mutation is synchronized with a remote
//! document collection store.
//!
//! ## Aggregates
//!
//! - [`lists`]: the list/item domain state and its synchronization
//!   contract. Item mutations are read-modify-write of the whole parent
//!   list document, serialized per list.
//! - [`auth`]: login, logout, and profile updates against the remote
//!   `users` collection.
//! - [`register`]: account creation.
//! - [`session`]: persistence of the authenticated session as a
//!   subscription adapter over the auth store's action broadcast.
//!
//! ## Wiring
//!
//! Each aggregate runs in its own [`listkeeper_runtime::Store`]. See the
//! binary in `main.rs` for a complete demo against the in-memory
//! collection store.

pub mod auth;
pub mod lists;
pub mod register;
pub mod session;

pub use auth::{AuthAction, AuthEnvironment, AuthReducer, AuthState};
pub use lists::{ListsAction, ListsEnvironment, ListsReducer, ListsState};
pub use register::{RegisterAction, RegisterEnvironment, RegisterReducer, RegisterState};
pub use session::{
    restore_session, AuthStore, FileSessionStore, MemorySessionStore, SessionError,
    SessionPersistence, SessionStore,
};
