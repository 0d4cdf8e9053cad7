//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run several reducers over the same state and action
//! - **`scope_reducer`**: Focus a reducer on one field of a parent state
//!
//! Together they give the "slice" layout: each slice reducer owns one field
//! of the root state, and every slice sees every action.
//!
//! # Example
//!
//! ```
//! use parlour_core::composition::{combine_reducers, scope_reducer};
//! use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct Root {
//!     guests: Vec<String>,
//!     tables: u32,
//! }
//!
//! #[derive(Clone)]
//! enum RootAction {
//!     Arrive(String),
//!     OpenTable,
//! }
//!
//! struct Guests;
//!
//! impl Reducer for Guests {
//!     type State = Vec<String>;
//!     type Action = RootAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Vec<String>, action: RootAction, _env: &()) -> SmallVec<[Effect<RootAction>; 4]> {
//!         if let RootAction::Arrive(name) = action {
//!             state.push(name);
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! struct Tables;
//!
//! impl Reducer for Tables {
//!     type State = u32;
//!     type Action = RootAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut u32, action: RootAction, _env: &()) -> SmallVec<[Effect<RootAction>; 4]> {
//!         if matches!(action, RootAction::OpenTable) {
//!             *state += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let root = combine_reducers(vec![
//!     Box::new(scope_reducer(Guests, |s: &Root| &s.guests, |s: &mut Root, v| s.guests = v)),
//!     Box::new(scope_reducer(Tables, |s: &Root| &s.tables, |s: &mut Root, v| s.tables = v)),
//! ]);
//!
//! let mut state = Root::default();
//! let _ = root.reduce(&mut state, RootAction::Arrive("Ada".into()), &());
//! let _ = root.reduce(&mut state, RootAction::OpenTable, &());
//! assert_eq!(state.guests, vec!["Ada".to_string()]);
//! assert_eq!(state.tables, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Boxed reducer over a shared state, action and environment
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Several reducers sharing one state and action type, run in order
///
/// Each reducer runs in order and all effects are concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Focuses a reducer on a field of a larger state.
///
/// `get_state` extracts the field, `set_state` writes the reduced value
/// back. The child reducer works on a copy of the field.
#[must_use]
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A reducer that operates on a field of a larger state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<fn(A, &E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut sub_state = (self.get_state)(state).clone();
        let effects = self.reducer.reduce(&mut sub_state, action, env);
        (self.set_state)(state, sub_state);
        effects
    }
}
