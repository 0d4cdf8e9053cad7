//! Menu entry editor
//!
//! One reducer drives both the "edit" and the "add to menu" pages. The
//! mode decides what is loaded on mount and whether submit issues a `PUT`
//! or a `POST`. Leaving the page is modelled as [`EditorState::navigate_to`].

use crate::{
    environment::ParlourEnvironment,
    form::{FormError, MenuItemForm},
};
use parlour_client::{ClientError, MenuItem};
use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;
use thiserror::Error;

/// Which page the editor backs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Edit the existing menu entry `menu_item_id`
    Update {
        /// Menu entry being edited
        menu_item_id: u64,
    },
    /// Add the stock ice cream `stock_id` to the menu
    Create {
        /// Catalogue entry being added
        stock_id: u64,
    },
}

/// Pages the editor can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The menu listing
    Menu,
}

/// Errors shown on the editor page
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
    /// The backend rejected or never answered a request
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The form does not describe a valid menu entry
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Editor page state
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    /// Update or create
    pub mode: EditorMode,
    /// Field values as typed
    pub form: MenuItemForm,
    /// The entry or stock record is being fetched
    pub loading: bool,
    /// A save or delete is outstanding
    pub saving: bool,
    /// Last failure, cleared by the next submit or delete
    pub error: Option<EditorError>,
    /// Set once the page should be left
    pub navigate_to: Option<Route>,
}

impl EditorState {
    /// State for editing menu entry `menu_item_id`
    #[must_use]
    pub fn update(menu_item_id: u64) -> Self {
        Self::with_form(EditorMode::Update { menu_item_id }, MenuItemForm::for_update())
    }

    /// State for adding stock ice cream `stock_id` to the menu
    #[must_use]
    pub fn create(stock_id: u64) -> Self {
        Self::with_form(EditorMode::Create { stock_id }, MenuItemForm::for_create())
    }

    fn with_form(mode: EditorMode, form: MenuItemForm) -> Self {
        Self {
            mode,
            form,
            loading: false,
            saving: false,
            error: None,
            navigate_to: None,
        }
    }

    /// Delete is offered only for existing entries
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        matches!(self.mode, EditorMode::Update { .. })
    }
}

/// Editor actions
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Page mounted; fetch what the mode needs
    Load,
    /// Fetch succeeded; the form to show
    Loaded(MenuItemForm),
    /// Fetch failed
    LoadFailed(ClientError),
    /// Description typed
    EditDescription(String),
    /// Price typed
    EditPrice(String),
    /// Quantity selected
    SetQuantity(String),
    /// Stock checkbox toggled
    SetInStock(bool),
    /// Save the form
    Submit,
    /// Backend stored the entry
    Saved(MenuItem),
    /// Backend refused the save
    SaveFailed(ClientError),
    /// Remove the entry from the menu
    Delete,
    /// Backend removed the entry
    Deleted,
    /// Backend refused the delete
    DeleteFailed(ClientError),
}

/// Reducer for [`EditorState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorReducer;

impl EditorReducer {
    fn load(mode: EditorMode, env: &ParlourEnvironment) -> Effect<EditorAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move {
            let loaded = match mode {
                EditorMode::Update { menu_item_id } => api
                    .get_menu_item(menu_item_id)
                    .await
                    .map(|item| MenuItemForm::from_item(&item)),
                EditorMode::Create { stock_id } => {
                    api.get_stock(stock_id).await.map(MenuItemForm::for_stock)
                },
            };
            Some(match loaded {
                Ok(form) => EditorAction::Loaded(form),
                Err(error) => EditorAction::LoadFailed(error),
            })
        })
    }

    fn save(state: &EditorState, env: &ParlourEnvironment) -> Result<Effect<EditorAction>, FormError> {
        let api = Arc::clone(&env.api);
        let effect = match state.mode {
            EditorMode::Update { menu_item_id } => {
                let item = state.form.to_menu_item(menu_item_id)?;
                Effect::future(async move { Some(saved(api.update_menu_item(item).await)) })
            },
            EditorMode::Create { .. } => {
                let item = state.form.to_new_item()?;
                Effect::future(async move { Some(saved(api.create_menu_item(item).await)) })
            },
        };
        Ok(effect)
    }
}

fn saved(result: Result<MenuItem, ClientError>) -> EditorAction {
    match result {
        Ok(item) => EditorAction::Saved(item),
        Err(error) => EditorAction::SaveFailed(error),
    }
}

impl Reducer for EditorReducer {
    type State = EditorState;
    type Action = EditorAction;
    type Environment = ParlourEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            EditorAction::Load => {
                state.loading = true;
                return smallvec![Self::load(state.mode, env)];
            },
            EditorAction::Loaded(form) => {
                state.form = form;
                state.loading = false;
            },
            EditorAction::LoadFailed(error) => {
                state.loading = false;
                if error.is_not_found() {
                    tracing::info!(mode = ?state.mode, "Nothing to edit, back to the menu");
                    state.navigate_to = Some(Route::Menu);
                } else {
                    tracing::warn!(%error, "Editor load failed");
                    state.error = Some(error.into());
                }
            },
            EditorAction::EditDescription(description) => state.form.description = description,
            EditorAction::EditPrice(price) => state.form.price = price,
            EditorAction::SetQuantity(quantity) => state.form.set_quantity(&quantity),
            EditorAction::SetInStock(in_stock) => state.form.set_in_stock(in_stock),
            EditorAction::Submit => match Self::save(state, env) {
                Ok(effect) => {
                    state.saving = true;
                    state.error = None;
                    return smallvec![effect];
                },
                Err(error) => {
                    tracing::debug!(%error, "Form rejected");
                    state.error = Some(error.into());
                },
            },
            EditorAction::Saved(item) => {
                tracing::info!(id = item.id, "Menu entry saved");
                state.saving = false;
                state.form = MenuItemForm::from_item(&item);
                state.navigate_to = Some(Route::Menu);
            },
            EditorAction::SaveFailed(error) => {
                tracing::warn!(%error, "Save failed");
                state.saving = false;
                state.error = Some(error.into());
            },
            EditorAction::Delete => {
                if let EditorMode::Update { menu_item_id } = state.mode {
                    state.saving = true;
                    state.error = None;

                    let api = Arc::clone(&env.api);
                    return smallvec![Effect::future(async move {
                        Some(match api.delete_menu_item(menu_item_id).await {
                            Ok(()) => EditorAction::Deleted,
                            Err(error) => EditorAction::DeleteFailed(error),
                        })
                    })];
                }
            },
            EditorAction::Deleted => {
                state.saving = false;
                state.navigate_to = Some(Route::Menu);
            },
            EditorAction::DeleteFailed(error) => {
                tracing::warn!(%error, "Delete failed");
                state.saving = false;
                state.error = Some(error.into());
            },
        }
        smallvec![Effect::None]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use parlour_client::IceCream;
    use parlour_testing::{ReducerTest, assertions, mocks::InMemoryMenuApi};

    fn env() -> ParlourEnvironment {
        ParlourEnvironment::new(InMemoryMenuApi::new())
    }

    fn loaded_create() -> EditorState {
        let mut state = EditorState::create(4);
        state.form = MenuItemForm::for_stock(IceCream {
            id: 4,
            name: "Lemon".to_string(),
        });
        state
    }

    #[test]
    fn test_load_not_found_navigates_to_menu() {
        ReducerTest::new(EditorReducer)
            .with_env(env())
            .given_state(EditorState::update(9))
            .when_action(EditorAction::LoadFailed(ClientError::NotFound {
                path: "/api/menu/9".to_string(),
            }))
            .then_state(|state| {
                assert_eq!(state.navigate_to, Some(Route::Menu));
                assert!(state.error.is_none());
            })
            .run();
    }

    #[test]
    fn test_other_load_failure_is_shown() {
        ReducerTest::new(EditorReducer)
            .with_env(env())
            .given_state(EditorState::update(9))
            .when_action(EditorAction::LoadFailed(ClientError::Transport("reset".to_string())))
            .then_state(|state| {
                assert!(state.navigate_to.is_none());
                assert_eq!(
                    state.error,
                    Some(EditorError::Client(ClientError::Transport("reset".to_string())))
                );
            })
            .run();
    }

    #[test]
    fn test_invalid_price_rejected_without_request() {
        let mut given = loaded_create();
        given.form.price = "two".to_string();
        given.form.set_quantity("10");

        ReducerTest::new(EditorReducer)
            .with_env(env())
            .given_state(given)
            .when_action(EditorAction::Submit)
            .then_state(|state| {
                assert!(!state.saving);
                assert_eq!(
                    state.error,
                    Some(EditorError::Form(FormError::InvalidPrice("two".to_string())))
                );
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_valid_submit_starts_save() {
        let mut given = loaded_create();
        given.form.price = "1.50".to_string();
        given.form.set_quantity("20");

        ReducerTest::new(EditorReducer)
            .with_env(env())
            .given_state(given)
            .when_action(EditorAction::Submit)
            .then_state(|state| assert!(state.saving))
            .then_effects(|effects| assertions::assert_has_future_effect(effects))
            .run();
    }

    #[test]
    fn test_delete_ignored_in_create_mode() {
        let state = loaded_create();
        assert!(!state.can_delete());

        ReducerTest::new(EditorReducer)
            .with_env(env())
            .given_state(state)
            .when_action(EditorAction::Delete)
            .then_unchanged()
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_unticking_stock_zeroes_quantity() {
        let mut given = loaded_create();
        given.form.set_quantity("30");

        ReducerTest::new(EditorReducer)
            .with_env(env())
            .given_state(given)
            .when_action(EditorAction::SetInStock(false))
            .then_state(|state| {
                assert_eq!(state.form.quantity, "0");
                assert!(!state.form.in_stock);
            })
            .run();
    }
}
