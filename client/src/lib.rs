//! # Parlour Client
//!
//! Data-access layer for the ice cream parlour backend: CRUD calls against
//! the `menu` collection and reads from its `stock-ice-creams` catalogue.
//!
//! ## Example
//!
//! ```no_run
//! use parlour_client::{ClientConfig, HttpMenuClient, MenuApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // PARLOUR_API_URL / PARLOUR_API_TIMEOUT_SECS, with defaults
//!     let client = HttpMenuClient::new(ClientConfig::from_env()?)?;
//!
//!     for item in client.list_menu().await? {
//!         println!("{} {}", item.ice_cream.name, item.price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Every operation surfaces transport, status and decode failures to the
//! caller as [`ClientError`]; nothing is retried or swallowed here.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use api::MenuApi;
pub use client::HttpMenuClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use types::{IceCream, MenuItem, NewMenuItem, sort_by_name, sort_menu};
