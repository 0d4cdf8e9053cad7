//! Given-When-Then harness for reducers
//!
//! Reduces one action against a given state and hands the result to
//! closures, without a store or a runtime.

#![allow(clippy::module_name_repetitions)]

use parlour_core::{
    effect::Effect,
    reducer::{Reducer, apply},
};

/// Check run against `(given, next)`
type StateAssertion<S> = Box<dyn FnOnce(&S, &S)>;

/// Check run against the returned effects
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// One reducer step under test
///
/// The reducer runs through [`apply`], so the given state is never touched;
/// `then_state` sees the next state and `then_unchanged` compares it with the
/// given one.
///
/// # Example
///
/// ```ignore
/// use parlour_testing::ReducerTest;
///
/// ReducerTest::new(ProfileReducer)
///     .with_env(())
///     .given_state(UserProfile::default())
///     .when_action(ProfileAction::SetAge(36))
///     .then_state(|state| {
///         assert_eq!(state.age, Some(36));
///     })
///     .then_effects(|effects| {
///         assertions::assert_no_effects(effects);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone + 'static,
    A: 'static,
{
    /// Start a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Environment handed to the reducer
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// State before the action (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Inspect the next state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions
            .push(Box::new(move |_given: &S, next: &S| assertion(next)));
        self
    }

    /// Assert the action left the state exactly as given (Then)
    #[must_use]
    pub fn then_unchanged(mut self) -> Self
    where
        S: PartialEq + std::fmt::Debug,
    {
        self.state_assertions.push(Box::new(|given: &S, next: &S| {
            assert_eq!(given, next, "Expected the state to be unchanged");
        }));
        self
    }

    /// Inspect the effects the reducer returned (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Reduce the action, then run every check in the order added
    ///
    /// # Panics
    ///
    /// Panics when a `given_state`, `when_action` or `with_env` call is
    /// missing, or when a check fails.
    #[allow(clippy::panic, clippy::expect_used)]
    pub fn run(self) {
        let given = self
            .initial_state
            .expect("given_state() was not called");

        let action = self.action.expect("when_action() was not called");

        let env = self
            .environment
            .expect("with_env() was not called");

        let (next, effects) = apply(&self.reducer, &given, action, &env);

        for assertion in self.state_assertions {
            assertion(&given, &next);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Checks for the effects a reducer returns
pub mod assertions {
    use parlour_core::effect::Effect;

    /// Every effect is a no-op
    ///
    /// # Panics
    ///
    /// Panics if some effect would do work when run.
    #[allow(clippy::panic)]
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected only no-op effects, got {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Exactly `expected` effects were returned
    ///
    /// # Panics
    ///
    /// Panics on a different count.
    #[allow(clippy::panic)]
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "expected {} effects, got {}",
            expected,
            effects.len()
        );
    }

    /// At least one effect is an async computation
    ///
    /// # Panics
    ///
    /// Panics if none is.
    #[allow(clippy::panic)]
    pub fn assert_has_future_effect<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "expected a Future effect among {:?}",
            effects
        );
    }
}

/// Run effects to completion outside a store
///
/// Awaits every `Future` effect (parallel ones in order) and collects the
/// actions they produce, so a test can feed them back by hand.
pub async fn run_effects<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A> {
    let mut pending: Vec<Effect<A>> = effects.into_iter().collect();
    pending.reverse();
    let mut actions = Vec::new();

    while let Some(effect) = pending.pop() {
        match effect {
            Effect::None => {},
            Effect::Parallel(children) => pending.extend(children.into_iter().rev()),
            Effect::Future(fut) => actions.extend(fut.await),
        }
    }

    actions
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use parlour_core::{smallvec, SmallVec};

    #[derive(Clone, Debug, PartialEq)]
    struct Scoops {
        count: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ScoopAction {
        Add,
        Melt,
        Order,
        Served(i32),
    }

    struct ScoopReducer;

    impl Reducer for ScoopReducer {
        type State = Scoops;
        type Action = ScoopAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                ScoopAction::Add => state.count += 1,
                ScoopAction::Melt if state.count > 0 => state.count -= 1,
                ScoopAction::Melt => {},
                ScoopAction::Order => {
                    return smallvec![Effect::merge(vec![
                        Effect::future(async { Some(ScoopAction::Served(1)) }),
                        Effect::future(async { Some(ScoopAction::Served(2)) }),
                    ])];
                },
                ScoopAction::Served(_) => {},
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_reducer_test_add() {
        ReducerTest::new(ScoopReducer)
            .with_env(())
            .given_state(Scoops { count: 0 })
            .when_action(ScoopAction::Add)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_unchanged() {
        ReducerTest::new(ScoopReducer)
            .with_env(())
            .given_state(Scoops { count: 0 })
            .when_action(ScoopAction::Melt)
            .then_unchanged()
            .run();
    }

    #[test]
    fn test_effect_count_assertion() {
        assertions::assert_effects_count(&[Effect::<ScoopAction>::None], 1);
        assertions::assert_effects_count::<ScoopAction>(&[], 0);
    }

    #[tokio::test]
    async fn test_run_effects_collects_actions_in_order() {
        let (_, effects) = apply(&ScoopReducer, &Scoops { count: 0 }, ScoopAction::Order, &());
        assertions::assert_effects_count(&effects, 1);

        let actions = run_effects(effects).await;

        assert_eq!(actions, vec![ScoopAction::Served(1), ScoopAction::Served(2)]);
    }
}
