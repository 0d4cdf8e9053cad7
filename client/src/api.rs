//! The menu resource as an injectable dependency

use crate::error::ClientError;
use crate::types::{IceCream, MenuItem, NewMenuItem};
use async_trait::async_trait;

/// CRUD operations against the menu collection
///
/// Reducers receive this through their environment as `Arc<dyn MenuApi>`,
/// so tests can swap the HTTP client for an in-memory fake.
///
/// Implementations must return `list_menu` sorted by ice cream name and
/// `list_stock` sorted by name (see [`crate::sort_menu`]), and must report an
/// absent id as [`ClientError::NotFound`].
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// `GET /api/menu`
    async fn list_menu(&self) -> Result<Vec<MenuItem>, ClientError>;

    /// `GET /api/menu/{id}`
    async fn get_menu_item(&self, id: u64) -> Result<MenuItem, ClientError>;

    /// `POST /api/menu`
    async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, ClientError>;

    /// `PUT /api/menu/{id}`
    async fn update_menu_item(&self, item: MenuItem) -> Result<MenuItem, ClientError>;

    /// `DELETE /api/menu/{id}`
    async fn delete_menu_item(&self, id: u64) -> Result<(), ClientError>;

    /// `GET /api/menu/stock-ice-creams`
    async fn list_stock(&self) -> Result<Vec<IceCream>, ClientError>;

    /// `GET /api/menu/stock-ice-creams/{id}`
    async fn get_stock(&self, id: u64) -> Result<IceCream, ClientError>;
}
