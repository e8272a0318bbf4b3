//! The menu of orderable items.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::money::Money;

/// Catalog code a user types to pick an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(u32);

impl ItemCode {
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// A single orderable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Code used to select the item.
    pub code: ItemCode,

    /// Human-readable name.
    pub name: String,

    /// Price of one unit.
    pub unit_price: Money,
}

impl MenuItem {
    pub fn new(code: u32, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            code: ItemCode::new(code),
            name: name.into(),
            unit_price,
        }
    }
}

/// Immutable lookup table of menu items, in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Builds a catalog, rejecting an empty list or duplicate codes.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.code) {
                return Err(CatalogError::DuplicateCode(item.code));
            }
        }

        Ok(Self { items })
    }

    /// The built-in menu.
    pub fn standard() -> Self {
        Self {
            items: vec![
                MenuItem::new(100, "Jollof", Money::from_naira(1500)),
                MenuItem::new(101, "Indomie", Money::from_naira(800)),
                MenuItem::new(102, "Poundo", Money::from_naira(2000)),
                MenuItem::new(103, "Semo", Money::from_naira(1800)),
            ],
        }
    }

    /// Loads a catalog from a JSON array of `{ "code", "name", "unit_price" }`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<MenuItem> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::new(items)?;
        tracing::info!(path = %path.display(), items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Looks up an item by code.
    pub fn resolve(&self, code: ItemCode) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.code == code)
    }

    /// Returns all items in declaration order.
    pub fn list(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    // A catalog is never empty; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
