//! A session's pending order.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;
use crate::error::CartError;
use crate::money::Money;

/// One selected item with its confirmed quantity.
///
/// Line items are immutable once created. Ordering the same item twice
/// produces two lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    item: MenuItem,
    quantity: NonZeroU32,
    subtotal: Money,
}

impl LineItem {
    /// Creates a line item, computing `quantity x unit_price`.
    pub fn new(item: MenuItem, quantity: NonZeroU32) -> Result<Self, CartError> {
        let subtotal = item.unit_price.checked_multiply(quantity.get()).ok_or_else(|| {
            CartError::AmountOverflow {
                item: item.name.clone(),
                quantity: quantity.get(),
            }
        })?;

        Ok(Self {
            item,
            quantity,
            subtotal,
        })
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

/// Ordered sequence of line items. The total is always derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line for `quantity` units of `item` and returns the new
    /// running total. On overflow the cart is left unchanged.
    pub fn add_line(&mut self, item: MenuItem, quantity: NonZeroU32) -> Result<Money, CartError> {
        let line = LineItem::new(item, quantity)?;
        self.push(line)
    }

    /// Appends an already-built line and returns the new running total.
    pub fn push(&mut self, line: LineItem) -> Result<Money, CartError> {
        let total = self.total_with(&line)?;
        self.lines.push(line);
        Ok(total)
    }

    /// Total the cart would have after appending `line`, without mutating it.
    pub fn total_with(&self, line: &LineItem) -> Result<Money, CartError> {
        self.lines
            .iter()
            .chain(std::iter::once(line))
            .try_fold(Money::zero(), |acc, l| acc.checked_add(l.subtotal))
            .ok_or_else(|| CartError::AmountOverflow {
                item: line.item.name.clone(),
                quantity: line.quantity(),
            })
    }

    /// Sum of all line subtotals; zero for an empty cart.
    pub fn total(&self) -> Money {
        self.lines.iter().map(LineItem::subtotal).sum()
    }

    /// Read-only view of the lines, oldest first.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Independent copy of the current lines.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.lines.clone()
    }
}
