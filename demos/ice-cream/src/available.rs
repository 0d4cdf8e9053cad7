//! Stock catalogue: ice creams that can be added to the menu

use crate::environment::ParlourEnvironment;
use parlour_client::{ClientError, IceCream};
use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// What the "add to menu" page shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailableState {
    /// Catalogue sorted by name
    pub ice_creams: Vec<IceCream>,
    /// A fetch is outstanding
    pub loading: bool,
    /// Last fetch failure
    pub error: Option<ClientError>,
}

/// Stock page actions
#[derive(Debug, Clone, PartialEq)]
pub enum AvailableAction {
    /// Page mounted; fetch the catalogue
    Load,
    /// Fetch succeeded
    Loaded(Vec<IceCream>),
    /// Fetch failed
    LoadFailed(ClientError),
}

/// Reducer for [`AvailableState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailableReducer;

impl Reducer for AvailableReducer {
    type State = AvailableState;
    type Action = AvailableAction;
    type Environment = ParlourEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AvailableAction::Load => {
                state.loading = true;
                state.error = None;

                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    Some(match api.list_stock().await {
                        Ok(ice_creams) => AvailableAction::Loaded(ice_creams),
                        Err(error) => AvailableAction::LoadFailed(error),
                    })
                })]
            },
            AvailableAction::Loaded(ice_creams) => {
                state.ice_creams = ice_creams;
                state.loading = false;
                smallvec![Effect::None]
            },
            AvailableAction::LoadFailed(error) => {
                tracing::warn!(%error, "Stock fetch failed");
                state.loading = false;
                state.error = Some(error);
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use parlour_core::reducer::apply;
    use parlour_testing::{mocks::InMemoryMenuApi, run_effects};

    #[tokio::test]
    async fn test_load_round_trip_through_effects() {
        let env = ParlourEnvironment::new(InMemoryMenuApi::with_stock(["Mint", "Cherry", "Mint"]));

        let (loading, effects) = apply(&AvailableReducer, &AvailableState::default(), AvailableAction::Load, &env);
        assert!(loading.loading);

        let mut state = loading;
        for action in run_effects(effects).await {
            state = apply(&AvailableReducer, &state, action, &env).0;
        }

        let names: Vec<_> = state.ice_creams.iter().map(|i| (i.id, i.name.as_str())).collect();
        assert_eq!(names, vec![(2, "Cherry"), (1, "Mint"), (3, "Mint")]);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let api = InMemoryMenuApi::new();
        api.fail_next(ClientError::Transport("offline".to_string()));
        let env = ParlourEnvironment::new(api);

        let (state, effects) = apply(&AvailableReducer, &AvailableState::default(), AvailableAction::Load, &env);
        let actions = run_effects(effects).await;
        let (state, _) = apply(&AvailableReducer, &state, actions[0].clone(), &env);

        assert_eq!(state.error, Some(ClientError::Transport("offline".to_string())));
        assert!(state.ice_creams.is_empty());
    }
}
