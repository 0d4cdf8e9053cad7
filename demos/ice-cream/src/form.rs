//! Editable form for one menu entry
//!
//! Price and quantity are kept as typed and only parsed on submit.
//! Stock and quantity are coupled: a quantity of zero clears `in_stock`
//! and clearing `in_stock` zeroes the quantity.

use parlour_client::{IceCream, MenuItem, NewMenuItem};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Quantities offered by the form's drop-down
pub const QUANTITY_OPTIONS: [u32; 6] = [0, 10, 20, 30, 40, 50];

/// Reasons a form cannot be submitted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// Price is not a non-negative decimal
    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    /// Quantity is not a whole number
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// No ice cream has been loaded into the form
    #[error("No ice cream selected")]
    MissingIceCream,
}

/// Form state for editing or creating a menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemForm {
    /// Price as typed, e.g. `"2.50"`
    pub price: String,
    /// Stock checkbox
    pub in_stock: bool,
    /// Quantity as selected, e.g. `"20"`
    pub quantity: String,
    /// Description text
    pub description: String,
    /// The ice cream being sold, once loaded
    pub ice_cream: Option<IceCream>,
}

impl MenuItemForm {
    /// Placeholder shown while an existing entry loads
    #[must_use]
    pub fn for_update() -> Self {
        Self {
            price: "0.00".to_string(),
            in_stock: true,
            quantity: "0".to_string(),
            description: String::new(),
            ice_cream: None,
        }
    }

    /// Blank form for a new entry
    #[must_use]
    pub fn for_create() -> Self {
        Self {
            price: String::new(),
            in_stock: false,
            quantity: String::new(),
            description: String::new(),
            ice_cream: None,
        }
    }

    /// Blank form for adding `ice_cream` to the menu
    #[must_use]
    pub fn for_stock(ice_cream: IceCream) -> Self {
        Self {
            ice_cream: Some(ice_cream),
            ..Self::for_create()
        }
    }

    /// Form filled from a stored entry, price shown with two decimals
    #[must_use]
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            price: format!("{:.2}", item.price),
            in_stock: item.in_stock,
            quantity: item.quantity.to_string(),
            description: item.description.clone(),
            ice_cream: Some(item.ice_cream.clone()),
        }
    }

    /// Select a quantity; zero means out of stock
    pub fn set_quantity(&mut self, quantity: &str) {
        self.quantity = quantity.to_string();
        self.in_stock = !matches!(quantity.trim().parse::<u32>(), Ok(0));
    }

    /// Tick or untick the stock checkbox; unticking zeroes the quantity
    pub fn set_in_stock(&mut self, in_stock: bool) {
        self.in_stock = in_stock;
        if !in_stock {
            self.quantity = "0".to_string();
        }
    }

    /// Payload for `POST /api/menu`
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] if a field does not parse or no ice cream is set.
    pub fn to_new_item(&self) -> Result<NewMenuItem, FormError> {
        let ice_cream = self.ice_cream.clone().ok_or(FormError::MissingIceCream)?;
        Ok(NewMenuItem {
            price: self.parse_price()?,
            in_stock: self.in_stock,
            quantity: self.parse_quantity()?,
            description: self.description.clone(),
            ice_cream,
        })
    }

    /// Payload for `PUT /api/menu/{id}`
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] if a field does not parse or no ice cream is set.
    pub fn to_menu_item(&self, id: u64) -> Result<MenuItem, FormError> {
        self.to_new_item().map(|item| item.with_id(id))
    }

    fn parse_price(&self) -> Result<Decimal, FormError> {
        let raw = self.price.trim();
        match Decimal::from_str(raw) {
            Ok(price) if !price.is_sign_negative() => {
                Ok(price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            },
            _ => Err(FormError::InvalidPrice(self.price.clone())),
        }
    }

    fn parse_quantity(&self) -> Result<u32, FormError> {
        self.quantity
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidQuantity(self.quantity.clone()))
    }
}
