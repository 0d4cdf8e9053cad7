//! Waiting list slice

use crate::ParlourAction;
use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Reducer for the waiting list
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationsReducer;

impl Reducer for ReservationsReducer {
    type State = Vec<String>;
    type Action = ParlourAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ParlourAction::AddReservation(name) => {
                let name = name.trim();
                if !name.is_empty() {
                    state.push(name.to_string());
                }
            },
            ParlourAction::RemoveReservation(name) => {
                if let Some(index) = state.iter().position(|r| *r == name) {
                    state.remove(index);
                }
            },
            ParlourAction::AddCustomer(_) | ParlourAction::AddFood { .. } => {},
        }

        smallvec![Effect::None]
    }
}
