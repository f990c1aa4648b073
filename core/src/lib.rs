//! # Shopfront Core
//!
//! Core traits and types for the Shopfront reducer architecture.
//!
//! This crate provides the fundamental abstractions for building the
//! storefront state model as a set of independently-reducible slices.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a slice (cart, auth, orders, theme)
//! - **Action**: All possible inputs to a reducer (intents and completions)
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
//! use shopfront_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CartState {
//!     lines: Vec<CartLine>,
//!     total_price: f64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CartAction {
//!     AddProduct(Product),
//!     RemoveProduct { product_id: u64 },
//! }
//!
//! impl Reducer for CartReducer {
//!     type State = CartState;
//!     type Action = CartAction;
//!     type Environment = CartEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CartState,
//!         action: CartAction,
//!         env: &CartEnvironment,
//!     ) -> SmallVec<[Effect<CartAction>; 4]> {
//!         // Business logic goes here
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer composition utilities (scoping slice reducers into an app reducer)
pub mod composition;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
/// A reducer must never suspend: asynchronous work is described by the
/// effects it returns, executed later by the store runtime.
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
    /// impl Reducer for ThemeReducer {
    ///     type State = ThemeState;
    ///     type Action = ThemeAction;
    ///     type Environment = ThemeEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut ThemeState,
    ///         action: ThemeAction,
    ///         env: &ThemeEnvironment,
    ///     ) -> SmallVec<[Effect<ThemeAction>; 4]> {
    ///         match action {
    ///             ThemeAction::ModeSet(mode) => {
    ///                 state.mode = mode;
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
        /// The effects to be executed by the runtime
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
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, retries)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
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

        /// Map the action type of an effect
        ///
        /// Used when embedding a slice's effects into a parent action type:
        /// a slice reducer returns `Effect<CartAction>`, the app store runs
        /// on `Effect<AppAction>`.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            Action: Send + 'static,
            B: Send + 'static,
            F: Fn(Action) -> B + Clone + Send + Sync + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => Effect::Parallel(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Sequential(effects) => Effect::Sequential(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(fut) => {
                    Effect::Future(Box::pin(async move { fut.await.map(f) }))
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::future::Future;
    use std::pin::Pin;
    use thiserror::Error;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    /// let now = clock.now();
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(some_instant);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Errors produced by a [`KeyValueStore`]
    ///
    /// Slices treat these as best-effort failures: reads degrade to the
    /// key's documented default, writes are logged and dropped.
    #[derive(Debug, Clone, Error)]
    pub enum StorageError {
        /// Reading a key failed
        #[error("storage read failed: {0}")]
        Read(String),

        /// Writing or removing a key failed
        #[error("storage write failed: {0}")]
        Write(String),
    }

    /// Asynchronous key→string store - the persistence collaborator
    ///
    /// Models a device key-value store: whole-value reads and writes by
    /// logical key, with no partial-update API. Reading a missing key
    /// returns `Ok(None)`, never an error.
    ///
    /// # Dyn Compatibility
    ///
    /// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
    /// `async fn` to enable trait object usage (`Arc<dyn KeyValueStore>`).
    /// This is required for the effect system where reducers create effects
    /// that capture the store.
    pub trait KeyValueStore: Send + Sync {
        /// Read the value stored under `key`, if any
        fn get<'a>(
            &'a self,
            key: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StorageError>> + Send + 'a>>;

        /// Store `value` under `key`, replacing any previous value
        fn set<'a>(
            &'a self,
            key: &'a str,
            value: String,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;

        /// Remove `key` and its value; removing an absent key succeeds
        fn remove<'a>(
            &'a self,
            key: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;
    }
}

#[cfg(test)]
#[allow(clippy::panic)] // Test code can panic
mod tests {
    use super::effect::Effect;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Child {
        Done,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Parent {
        Child(Child),
    }

    #[test]
    fn map_rewraps_delay_actions() {
        let effect: Effect<Child> = Effect::Delay {
            duration: Duration::from_millis(5),
            action: Box::new(Child::Done),
        };

        let mapped = effect.map(Parent::Child);
        match mapped {
            Effect::Delay { action, .. } => assert_eq!(*action, Parent::Child(Child::Done)),
            other => panic!("expected Delay, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn map_rewraps_future_actions() {
        let effect: Effect<Child> = Effect::Future(Box::pin(async { Some(Child::Done) }));

        let Effect::Future(fut) = effect.map(Parent::Child) else {
            panic!("expected Future");
        };
        assert_eq!(fut.await, Some(Parent::Child(Child::Done)));
    }

    #[test]
    fn map_preserves_nesting() {
        let effect: Effect<Child> = Effect::merge(vec![
            Effect::None,
            Effect::chain(vec![Effect::None]),
        ]);

        match effect.map(Parent::Child) {
            Effect::Parallel(inner) => assert_eq!(inner.len(), 2),
            other => panic!("expected Parallel, got {other:?}"),
        }
    }
}
