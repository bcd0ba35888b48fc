//! # Listkeeper Testing
//!
//! Testing utilities and helpers for the listkeeper architecture.
//!
//! The central piece is [`ReducerTest`], a fluent Given/When/Then harness
//! for exercising pure reducers without a runtime Store. Effect assertions
//! live in [`reducer_test::assertions`].

mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};
