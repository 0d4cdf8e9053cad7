//! # Reservations Example
//!
//! Two slices of one root state, each with its own reducer:
//!
//! - `reservations`: names waiting for a table
//! - `customers`: seated customers and the food they ordered
//!
//! Both slice reducers see every action; [`parlour_reducer`] combines them.
//! Seating a reservation is two actions (see [`seat`]): add the customer,
//! then remove the reservation.

pub mod customers;
pub mod reservations;

use parlour_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use std::fmt;
use uuid::Uuid;

pub use customers::{Customer, CustomersReducer};
pub use reservations::ReservationsReducer;

/// Unique identifier for a seated customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generate a new random id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParlourState {
    /// Names waiting for a table, in arrival order
    pub reservations: Vec<String>,
    /// Seated customers, in seating order
    pub customers: Vec<Customer>,
}

/// Actions shared by both slices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParlourAction {
    /// Put a name on the waiting list; blank names are ignored
    AddReservation(String),
    /// Take the first matching name off the waiting list
    RemoveReservation(String),
    /// Seat a customer
    AddCustomer(Customer),
    /// Add a dish to a customer's order; repeats are ignored
    AddFood {
        /// Who ordered
        customer_id: CustomerId,
        /// What they ordered
        food: String,
    },
}

/// The combined root reducer
#[must_use]
pub fn parlour_reducer() -> CombinedReducer<ParlourState, ParlourAction, ()> {
    combine_reducers(vec![
        Box::new(scope_reducer(
            ReservationsReducer,
            |state: &ParlourState| &state.reservations,
            |state: &mut ParlourState, reservations| state.reservations = reservations,
        )),
        Box::new(scope_reducer(
            CustomersReducer,
            |state: &ParlourState| &state.customers,
            |state: &mut ParlourState, customers| state.customers = customers,
        )),
    ])
}

/// Actions that seat the reservation `name` as a new customer
#[must_use]
pub fn seat(name: &str, id: CustomerId) -> [ParlourAction; 2] {
    [
        ParlourAction::AddCustomer(Customer::new(id, name)),
        ParlourAction::RemoveReservation(name.to_string()),
    ]
}
