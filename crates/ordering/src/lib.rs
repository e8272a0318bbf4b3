//! Order-accumulation model for the ordering bot.
//!
//! This crate provides:
//! - `Catalog`: the immutable menu of orderable items
//! - `Cart`: a session's pending line items with a derived total
//! - `Ledger`: the append-only, process-wide record of placed orders

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;

pub use cart::{Cart, LineItem};
pub use catalog::{Catalog, ItemCode, MenuItem};
pub use error::{CartError, CatalogError};
pub use ledger::{Ledger, LedgerEntry};
pub use money::Money;
