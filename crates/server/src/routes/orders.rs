//! Read-only view of the order ledger.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use ordering::LedgerEntry;
use serde::Serialize;

use crate::AppState;
use crate::error::ApiError;

/// Public view of a placed order. Must never carry the placing session id:
/// that id resumes the session's chat and cart.
#[derive(Serialize)]
pub struct OrderResponse {
    pub number: usize,
    pub customer: Option<String>,
    pub items: Vec<OrderLineResponse>,
    pub total: u64,
    pub placed_at: String,
}

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub code: u32,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
}

impl From<LedgerEntry> for OrderResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            number: entry.number,
            customer: entry.customer,
            items: entry
                .lines
                .iter()
                .map(|line| OrderLineResponse {
                    code: line.item().code.value(),
                    name: line.item().name.clone(),
                    quantity: line.quantity(),
                    unit_price: line.item().unit_price.naira(),
                    subtotal: line.subtotal().naira(),
                })
                .collect(),
            total: entry.total.naira(),
            placed_at: entry.placed_at.to_rfc3339(),
        }
    }
}

/// GET /orders: every placed order, oldest first.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<OrderResponse>> {
    let orders = state
        .hub
        .ledger()
        .history()
        .into_iter()
        .map(OrderResponse::from)
        .collect();
    Json(orders)
}

/// GET /orders/{number}: one placed order by its ledger number.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let number: usize = number
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid order number: {number}")))?;

    state
        .hub
        .ledger()
        .get(number)
        .map(|entry| Json(OrderResponse::from(entry)))
        .ok_or_else(|| ApiError::NotFound(format!("Order {number} not found")))
}
