//! Ice cream parlour
//!
//! Reducers for the three parlour pages, all talking to the menu backend
//! through the injected [`ParlourEnvironment`]:
//!
//! - [`menu`]: the menu listing
//! - [`available`]: stock ice creams that can be added to the menu
//! - [`editor`]: edit, add or delete one menu entry
//!
//! [`form`] holds the editor's text-backed form and its stock/quantity
//! coupling. [`session`] runs whole editor visits for the command line.

pub mod available;
pub mod editor;
pub mod environment;
pub mod form;
pub mod menu;
pub mod session;

pub use available::{AvailableAction, AvailableReducer, AvailableState};
pub use editor::{EditorAction, EditorError, EditorMode, EditorReducer, EditorState, Route};
pub use environment::ParlourEnvironment;
pub use form::{FormError, MenuItemForm, QUANTITY_OPTIONS};
pub use menu::{MenuAction, MenuReducer, MenuState, menu_row};
pub use session::{FormEdits, SessionError, delete_entry, load_editor, submit_edits};

use parlour_runtime::Store;

/// Store backing the menu page
pub type MenuStore = Store<MenuState, MenuAction, ParlourEnvironment, MenuReducer>;

/// Store backing the stock page
pub type AvailableStore = Store<AvailableState, AvailableAction, ParlourEnvironment, AvailableReducer>;

/// Store backing the editor page
pub type EditorStore = Store<EditorState, EditorAction, ParlourEnvironment, EditorReducer>;
