//! Append-only record of placed orders.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::SessionId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::money::Money;

/// Immutable snapshot of a cart at the moment its checkout was confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// 1-based position in the ledger.
    pub number: usize,

    /// Session that placed the order.
    pub session: SessionId,

    /// Display name given at the start of the conversation.
    pub customer: Option<String>,

    pub lines: Vec<LineItem>,

    pub total: Money,

    pub placed_at: DateTime<Utc>,
}

/// Process-wide ledger of placed orders.
///
/// Cloning is cheap and every clone shares the same entries. Appends are
/// serialized by the write lock, so concurrent checkouts from different
/// connections get distinct, gap-free numbers.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Arc<RwLock<Vec<LedgerEntry>>>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a copy of `lines` as a new order and returns the stored entry.
    pub fn record(
        &self,
        session: SessionId,
        customer: Option<String>,
        lines: Vec<LineItem>,
    ) -> LedgerEntry {
        let total = lines.iter().map(LineItem::subtotal).sum();
        let mut entries = self.entries.write();
        let entry = LedgerEntry {
            number: entries.len() + 1,
            session,
            customer,
            lines,
            total,
            placed_at: Utc::now(),
        };
        entries.push(entry.clone());
        drop(entries);

        tracing::info!(
            order_number = entry.number,
            %session,
            total = entry.total.naira(),
            "order recorded"
        );
        entry
    }

    /// All entries, oldest first.
    pub fn history(&self) -> Vec<LedgerEntry> {
        self.entries.read().clone()
    }

    /// Entries placed by one session, oldest first.
    pub fn history_for(&self, session: SessionId) -> Vec<LedgerEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.session == session)
            .cloned()
            .collect()
    }

    /// Looks up an entry by its 1-based number.
    pub fn get(&self, number: usize) -> Option<LedgerEntry> {
        let index = number.checked_sub(1)?;
        self.entries.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
