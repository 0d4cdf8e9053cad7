//! Menu listing: fetch every menu entry, sorted by ice cream name

use crate::environment::ParlourEnvironment;
use parlour_client::{ClientError, MenuItem};
use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// What the menu page shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuState {
    /// Entries in display order
    pub items: Vec<MenuItem>,
    /// A fetch is outstanding
    pub loading: bool,
    /// Last fetch failure, cleared on the next load
    pub error: Option<ClientError>,
}

/// Menu page actions
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Page mounted; fetch the menu
    Load,
    /// Fetch succeeded
    Loaded(Vec<MenuItem>),
    /// Fetch failed
    LoadFailed(ClientError),
}

/// Reducer for [`MenuState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuReducer;

impl Reducer for MenuReducer {
    type State = MenuState;
    type Action = MenuAction;
    type Environment = ParlourEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            MenuAction::Load => {
                state.loading = true;
                state.error = None;

                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    Some(match api.list_menu().await {
                        Ok(items) => MenuAction::Loaded(items),
                        Err(error) => MenuAction::LoadFailed(error),
                    })
                })]
            },
            MenuAction::Loaded(items) => {
                state.items = items;
                state.loading = false;
                smallvec![Effect::None]
            },
            MenuAction::LoadFailed(error) => {
                tracing::warn!(%error, "Menu fetch failed");
                state.loading = false;
                state.error = Some(error);
                smallvec![Effect::None]
            },
        }
    }
}

/// One line of the menu table, e.g. `Vanilla  2.50  20 in stock`
#[must_use]
pub fn menu_row(item: &MenuItem) -> String {
    let stock = if item.in_stock {
        format!("{} in stock", item.quantity)
    } else {
        "out of stock".to_string()
    };
    let price = format!("{:.2}", item.price);
    format!("{:<20} {price:>8}  {stock}", item.ice_cream.name)
}
