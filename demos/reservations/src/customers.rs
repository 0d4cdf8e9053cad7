//! Seated customers slice

use crate::{CustomerId, ParlourAction};
use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// A seated customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Customer id
    pub id: CustomerId,
    /// Name from the reservation
    pub name: String,
    /// Dishes ordered, without repeats
    pub food: Vec<String>,
}

impl Customer {
    /// A customer who has not ordered yet
    #[must_use]
    pub fn new(id: CustomerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            food: Vec::new(),
        }
    }
}

/// Reducer for seated customers
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomersReducer;

impl Reducer for CustomersReducer {
    type State = Vec<Customer>;
    type Action = ParlourAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ParlourAction::AddCustomer(customer) => state.push(customer),
            ParlourAction::AddFood { customer_id, food } => {
                let food = food.trim();
                if let Some(customer) = state.iter_mut().find(|c| c.id == customer_id) {
                    if !food.is_empty() && !customer.food.iter().any(|f| f == food) {
                        customer.food.push(food.to_string());
                    }
                }
            },
            ParlourAction::AddReservation(_) | ParlourAction::RemoveReservation(_) => {},
        }

        smallvec![Effect::None]
    }
}
