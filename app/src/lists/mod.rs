//! The lists aggregate: shopping lists and their grocery items.
//!
//! State transitions are pure reducer arms; every remote interaction is an
//! `Effect::Future` built by [`ListsEnvironment`] that resolves to exactly
//! one completion action. Item-level mutations are read-modify-write of the
//! whole parent list document, serialized per list by the reducer.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod state;

pub use actions::ListsAction;
pub use environment::ListsEnvironment;
pub use reducer::ListsReducer;
pub use state::ListsState;
