//! Editor sessions as run by the command line
//!
//! Each function drives an [`EditorStore`] through one page visit and
//! reports the first failure the page recorded. A load failure stops the
//! session before anything is submitted or deleted.

use crate::{
    editor::{EditorAction, EditorError, Route},
    EditorStore,
};
use parlour_runtime::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for the requests one action starts
pub const ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Field values to apply before submitting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEdits {
    /// New price text
    pub price: Option<String>,
    /// New quantity text
    pub quantity: Option<String>,
    /// Untick the stock checkbox
    pub out_of_stock: bool,
    /// New description
    pub description: Option<String>,
}

/// Why an editor session did not complete
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// The store refused an action or its effects timed out
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The page recorded a client or form error
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// The entry or stock record does not exist
    #[error("Nothing to edit: the entry no longer exists")]
    Missing,

    /// The page never asked to leave
    #[error("Editor did not finish")]
    Unfinished,
}

async fn dispatch(store: &EditorStore, action: EditorAction) -> Result<(), SessionError> {
    let mut handle = store.send(action).await?;
    handle.wait_with_timeout(ACTION_TIMEOUT).await?;
    Ok(())
}

/// Load the page and fail on any load error
///
/// # Errors
///
/// [`SessionError::Missing`] when the record is gone, otherwise the
/// recorded [`EditorError`].
pub async fn load_editor(store: &EditorStore) -> Result<(), SessionError> {
    dispatch(store, EditorAction::Load).await?;

    let (navigate_to, error) = store.state(|s| (s.navigate_to, s.error.clone())).await;
    if let Some(error) = error {
        return Err(error.into());
    }
    match navigate_to {
        Some(Route::Menu) => Err(SessionError::Missing),
        None => Ok(()),
    }
}

/// Load, apply `edits`, submit and wait for the save
///
/// # Errors
///
/// The first load, form or save failure.
pub async fn submit_edits(store: &EditorStore, edits: FormEdits) -> Result<(), SessionError> {
    load_editor(store).await?;

    if let Some(description) = edits.description {
        dispatch(store, EditorAction::EditDescription(description)).await?;
    }
    if let Some(price) = edits.price {
        dispatch(store, EditorAction::EditPrice(price)).await?;
    }
    if let Some(quantity) = edits.quantity {
        dispatch(store, EditorAction::SetQuantity(quantity)).await?;
    }
    if edits.out_of_stock {
        dispatch(store, EditorAction::SetInStock(false)).await?;
    }

    dispatch(store, EditorAction::Submit).await?;
    finish(store).await
}

/// Load the entry, then delete it
///
/// # Errors
///
/// The first load or delete failure. Nothing is deleted when the load fails.
pub async fn delete_entry(store: &EditorStore) -> Result<(), SessionError> {
    load_editor(store).await?;
    dispatch(store, EditorAction::Delete).await?;
    finish(store).await
}

async fn finish(store: &EditorStore) -> Result<(), SessionError> {
    let (navigate_to, error) = store.state(|s| (s.navigate_to, s.error.clone())).await;
    store.unmount();

    if let Some(error) = error {
        return Err(error.into());
    }
    match navigate_to {
        Some(Route::Menu) => Ok(()),
        None => Err(SessionError::Unfinished),
    }
}
