//! Error types for the ordering model.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::ItemCode;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no items.
    #[error("Catalog must contain at least one item")]
    Empty,

    /// Two items share a code.
    #[error("Duplicate item code in catalog: {0}")]
    DuplicateCode(ItemCode),

    /// The catalog file could not be read.
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a valid item list.
    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A subtotal or the running total does not fit in a `Money` value.
    #[error("Amount overflow: {quantity} x {item}")]
    AmountOverflow { item: String, quantity: u32 },
}
