//! # Listkeeper Core
//!
//! Core traits and types for the listkeeper reducer architecture.
//!
//! This crate provides the fundamental abstractions used by every aggregate
//! in the workspace: the list/item domain state, authentication state, and
//! registration state are all driven through the same `Reducer`/`Effect`
//! machinery defined here.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for an aggregate (owned, `Clone`-able data)
//! - **Action**: All possible inputs to a reducer (intent commands and the
//!   completion events their effects resolve to)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use listkeeper_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! impl Reducer for ListsReducer {
//!     type State = ListsState;
//!     type Action = ListsAction;
//!     type Environment = ListsEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ListsState,
//!         action: ListsAction,
//!         env: &ListsEnvironment,
//!     ) -> SmallVec<[Effect<ListsAction>; 4]> {
//!         // Business logic goes here
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
/// A reducer must never perform I/O itself and must never panic; anything
/// asynchronous is described as an [`Effect`](crate::effect::Effect) and
/// executed by the runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for AuthReducer {
    ///     type State = AuthState;
    ///     type Action = AuthAction;
    ///     type Environment = AuthEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut AuthState,
    ///         action: AuthAction,
    ///         env: &AuthEnvironment,
    ///     ) -> SmallVec<[Effect<AuthAction>; 4]> {
    ///         match action {
    ///             AuthAction::Logout => {
    ///                 state.user = None;
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Most actions produce zero
        /// or one effect, hence the inline capacity of four.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into
        /// the reducer. Every synchronization intent in this workspace maps
        /// to exactly one `Future` effect resolving to exactly one
        /// completion action.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter. Production wires the system clock and
/// uuid-backed id generation; tests inject fixed clocks and sequential ids
/// so reducer output is deterministic.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Fixed clock for deterministic tests
    #[derive(Clone, Copy, Debug)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a clock that always reports `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// `IdGenerator` trait - abstracts id minting for testability
    ///
    /// Item ids are minted on the client side before the read-modify-write
    /// round trip, so the generator must be injectable to keep reducer
    /// effects deterministic under test.
    pub trait IdGenerator: Send + Sync {
        /// Mint a fresh unique id
        fn generate(&self) -> String;
    }

    /// Production id generator backed by uuid v4
    #[derive(Clone, Copy, Debug, Default)]
    pub struct UuidIdGenerator;

    impl IdGenerator for UuidIdGenerator {
        fn generate(&self) -> String {
            uuid::Uuid::new_v4().to_string()
        }
    }

    /// Sequential id generator for deterministic tests
    ///
    /// Produces `"id-1"`, `"id-2"`, ... in dispatch order.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `id-1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
            format!("id-{n}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{
        Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock,
    };
    use chrono::{TimeZone, Utc};

    #[test]
    #[allow(clippy::unwrap_used)]
    fn fixed_clock_reports_fixed_time() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap();
        let clock = FixedClock::new(time);
        assert_eq!(clock.now(), time);
        assert_eq!(clock.now(), time);
    }

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn sequential_ids_are_ordered() {
        let generator = SequentialIdGenerator::new();
        assert_eq!(generator.generate(), "id-1");
        assert_eq!(generator.generate(), "id-2");
        assert_eq!(generator.generate(), "id-3");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let generator = super::environment::UuidIdGenerator;
        let a = generator.generate();
        let b = generator.generate();
        assert_ne!(a, b);
    }

    #[test]
    fn effect_debug_formats() {
        let effect: Effect<u32> = Effect::None;
        assert_eq!(format!("{effect:?}"), "Effect::None");

        let effect: Effect<u32> = Effect::Future(Box::pin(async { None }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[test]
    fn merge_builds_parallel() {
        let effect: Effect<u32> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(effect, Effect::Parallel(ref effects) if effects.len() == 2));
    }
}
