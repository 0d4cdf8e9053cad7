//! # Parlour Core
//!
//! Core traits and types for reducer-driven state containers.
//!
//! ## Core Concepts
//!
//! - **State**: Plain data owned by a store
//! - **Action**: Closed enum of every input a reducer accepts
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies, passed explicitly
//!
//! ## Example
//!
//! ```
//! use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Profile {
//!     user_name: Option<String>,
//! }
//!
//! enum ProfileAction {
//!     SetUserName(String),
//! }
//!
//! struct ProfileReducer;
//!
//! impl Reducer for ProfileReducer {
//!     type State = Profile;
//!     type Action = ProfileAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Profile,
//!         action: ProfileAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<ProfileAction>; 4]> {
//!         match action {
//!             ProfileAction::SetUserName(name) => state.user_name = Some(name),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let initial = Profile::default();
//! let (next, _) = parlour_core::reducer::apply(
//!     &ProfileReducer,
//!     &initial,
//!     ProfileAction::SetUserName("Ada".to_string()),
//!     &(),
//! );
//! assert_eq!(next.user_name.as_deref(), Some("Ada"));
//! assert_eq!(initial.user_name, None);
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Reducer composition utilities
pub mod composition;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all of a feature's logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// Effects returned from a single reduction
    pub type Effects<A> = SmallVec<[Effect<A>; 4]>;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The closed set of actions this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Every action must produce exactly one next state. Actions that do not
    /// apply to the current state leave it unchanged.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: The state to update; callers own it exclusively
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effect descriptions to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }

    /// Compute the next state without touching the input
    ///
    /// Clones `state`, reduces the clone and returns it together with the
    /// effects. The `Store` commits state the same way, so a reducer that
    /// panics half-way never leaves a partially updated record behind.
    pub fn apply<R>(
        reducer: &R,
        state: &R::State,
        action: R::Action,
        env: &R::Environment,
    ) -> (R::State, Effects<R::Action>)
    where
        R: Reducer + ?Sized,
        R::State: Clone,
    {
        let mut next = state.clone();
        let effects = reducer.reduce(&mut next, action, env);
        (next, effects)
    }
}

/// Side effects as values
///
/// Reducers return these; only the `Store` runs them.
/// They are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// A side effect the runtime will perform
    ///
    /// Effects are NOT executed immediately. They are returned from reducers
    /// and executed by the Store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// If the future resolves to `Some(action)`, the action is fed back
        /// into the store.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

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
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Run `effects` concurrently
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Wrap an async computation that may feed an action back
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
                Effect::Future(_) => false,
            }
        }
    }
}
