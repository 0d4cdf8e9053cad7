//! Wire types for the menu resource

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An ice cream from the stock catalogue
///
/// Also embedded in every [`MenuItem`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceCream {
    /// Catalogue id
    pub id: u64,
    /// Display name
    pub name: String,
}

/// An entry on the menu, as stored by the backend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Menu entry id
    pub id: u64,
    /// Price per scoop
    pub price: Decimal,
    /// Whether the item can be ordered
    pub in_stock: bool,
    /// Scoops available
    pub quantity: u32,
    /// Free-form description
    pub description: String,
    /// The ice cream this entry sells
    pub ice_cream: IceCream,
}

/// A menu entry that has not been created yet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    /// Price per scoop
    pub price: Decimal,
    /// Whether the item can be ordered
    pub in_stock: bool,
    /// Scoops available
    pub quantity: u32,
    /// Free-form description
    pub description: String,
    /// The ice cream this entry sells
    pub ice_cream: IceCream,
}

impl NewMenuItem {
    /// Attach the id assigned by the backend
    #[must_use]
    pub fn with_id(self, id: u64) -> MenuItem {
        MenuItem {
            id,
            price: self.price,
            in_stock: self.in_stock,
            quantity: self.quantity,
            description: self.description,
            ice_cream: self.ice_cream,
        }
    }
}

/// Sort menu items by ice cream name
///
/// Case-sensitive, stable: items with equal names keep their input order.
pub fn sort_menu(items: &mut [MenuItem]) {
    items.sort_by(|a, b| a.ice_cream.name.cmp(&b.ice_cream.name));
}

/// Sort catalogue entries by name, stable and case-sensitive
pub fn sort_by_name(ice_creams: &mut [IceCream]) {
    ice_creams.sort_by(|a, b| a.name.cmp(&b.name));
}
