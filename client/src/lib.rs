//! # Listkeeper Client
//!
//! The remote collection store boundary: wire types, the [`CollectionStore`]
//! trait, and its two implementations.
//!
//! The backend is a plain document collection store reachable over HTTP. It
//! exposes `users` and `lists` collections where each list document embeds
//! its grocery items; there is no item-level sub-resource endpoint, so every
//! item mutation upstream of this crate is a read-modify-write of the whole
//! parent list document.
//!
//! - [`HttpCollectionStore`]: reqwest-backed production implementation
//! - [`MemoryCollectionStore`]: in-memory implementation for tests and demos

pub mod error;
pub mod http;
pub mod memory;
pub mod store;
pub mod types;

pub use error::ClientError;
pub use http::HttpCollectionStore;
pub use memory::MemoryCollectionStore;
pub use store::CollectionStore;
pub use types::{
    GroceryItem, ItemDraft, ItemId, ItemPatch, List, ListId, NewList, NewUser, User, UserId,
    UserPatch, ValidationError, DEFAULT_CATEGORY,
};
