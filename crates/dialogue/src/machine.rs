//! The dialogue transition function.
//!
//! `step` maps the current state and one raw message to the next state, the
//! reply, and the cart/ledger effects to apply. It never mutates anything, so
//! every transition can be exercised without a transport.

use common::SessionId;
use ordering::{Cart, Catalog, Ledger, LineItem, MenuItem};

use crate::command::{Confirmation, MenuCommand, QuantityInput, resolve_item};
use crate::reply::{Rejection, Reply};
use crate::state::{DialogueState, Phase};

/// Which placed orders the `98` command shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryScope {
    /// Only orders placed by the requesting session.
    #[default]
    Session,
    /// Every order in the ledger.
    Global,
}

impl std::str::FromStr for HistoryScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "session" => Ok(HistoryScope::Session),
            "global" => Ok(HistoryScope::Global),
            other => Err(format!("unknown history scope: {other}")),
        }
    }
}

/// Read-only collaborators a transition may consult.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub catalog: &'a Catalog,
    pub cart: &'a Cart,
    pub ledger: &'a Ledger,
    pub session: SessionId,
    pub history_scope: HistoryScope,
}

/// A mutation the caller must apply after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the line to the session's cart.
    AddLine(LineItem),
    /// Empty the session's cart.
    ClearCart,
    /// Record the cart in the ledger, then empty it.
    PlaceOrder,
}

/// Result of interpreting one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: DialogueState,
    pub effects: Vec<Effect>,
    pub reply: Reply,
}

impl Transition {
    fn to(next: DialogueState, reply: impl Into<Reply>) -> Self {
        Self {
            next,
            effects: Vec::new(),
            reply: reply.into(),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Interprets `input` in the current phase.
pub fn step(state: &DialogueState, input: &str, ctx: &StepContext<'_>) -> Transition {
    let input = input.trim();
    match state.phase() {
        Phase::AwaitingName => on_name(state, input),
        Phase::MainMenu => on_main_menu(state, MenuCommand::parse(input, ctx.catalog), ctx),
        Phase::AwaitingItemSelection => on_item_selection(state, input, ctx),
        Phase::AwaitingQuantity { item } => {
            on_quantity(state, item, QuantityInput::parse(input), ctx)
        }
        Phase::AwaitingCheckoutConfirmation => {
            on_confirmation(state, Confirmation::parse(input), ctx)
        }
    }
}

fn on_name(state: &DialogueState, input: &str) -> Transition {
    if input.is_empty() {
        return Transition::to(state.clone(), Rejection::BlankName);
    }

    Transition::to(
        state.with_user_name(input).with_phase(Phase::MainMenu),
        Reply::Welcome {
            name: input.to_string(),
        },
    )
}

fn on_main_menu(state: &DialogueState, command: MenuCommand, ctx: &StepContext<'_>) -> Transition {
    match command {
        MenuCommand::BrowseCatalog => Transition::to(
            state.with_phase(Phase::AwaitingItemSelection),
            Reply::Catalog {
                items: ctx.catalog.list().to_vec(),
            },
        ),
        MenuCommand::SelectItem(code) => match ctx.catalog.resolve(code) {
            Some(item) => select(state, item),
            None => Transition::to(state.clone(), Rejection::InvalidSelection),
        },
        MenuCommand::Checkout => {
            if ctx.cart.is_empty() {
                Transition::to(state.clone(), Rejection::EmptyCartCheckout)
            } else {
                Transition::to(
                    state.with_phase(Phase::AwaitingCheckoutConfirmation),
                    Reply::CheckoutSummary {
                        lines: ctx.cart.snapshot(),
                        total: ctx.cart.total(),
                    },
                )
            }
        }
        MenuCommand::OrderHistory => {
            let entries = match ctx.history_scope {
                HistoryScope::Session => ctx.ledger.history_for(ctx.session),
                HistoryScope::Global => ctx.ledger.history(),
            };
            let reply = if entries.is_empty() {
                Reply::NoHistory
            } else {
                Reply::History { entries }
            };
            Transition::to(state.clone(), reply)
        }
        MenuCommand::CurrentOrder => {
            let reply = if ctx.cart.is_empty() {
                Reply::EmptyCart
            } else {
                Reply::CurrentOrder {
                    lines: ctx.cart.snapshot(),
                    total: ctx.cart.total(),
                }
            };
            Transition::to(state.clone(), reply)
        }
        MenuCommand::CancelOrder => {
            Transition::to(state.clone(), Reply::OrderCancelled).with_effect(Effect::ClearCart)
        }
        MenuCommand::Unrecognized => Transition::to(state.clone(), Rejection::InvalidSelection),
    }
}

fn on_item_selection(state: &DialogueState, input: &str, ctx: &StepContext<'_>) -> Transition {
    match resolve_item(input, ctx.catalog) {
        Some(item) => select(state, item),
        None => Transition::to(state.clone(), Rejection::InvalidSelection),
    }
}

fn select(state: &DialogueState, item: &MenuItem) -> Transition {
    Transition::to(
        state.with_phase(Phase::AwaitingQuantity { item: item.clone() }),
        Reply::AskQuantity { item: item.clone() },
    )
}

fn on_quantity(
    state: &DialogueState,
    item: &MenuItem,
    quantity: QuantityInput,
    ctx: &StepContext<'_>,
) -> Transition {
    let QuantityInput::Valid(quantity) = quantity else {
        return Transition::to(state.clone(), Rejection::InvalidQuantity);
    };

    let line = match LineItem::new(item.clone(), quantity) {
        Ok(line) => line,
        Err(_) => return Transition::to(state.clone(), Rejection::InvalidQuantity),
    };
    let Ok(total) = ctx.cart.total_with(&line) else {
        return Transition::to(state.clone(), Rejection::InvalidQuantity);
    };

    Transition::to(
        state.with_phase(Phase::MainMenu),
        Reply::LineAdded {
            line: line.clone(),
            total,
        },
    )
    .with_effect(Effect::AddLine(line))
}

fn on_confirmation(
    state: &DialogueState,
    confirmation: Confirmation,
    ctx: &StepContext<'_>,
) -> Transition {
    let next = state.with_phase(Phase::MainMenu);
    match confirmation {
        // Another connection on the same session may have emptied the cart.
        Confirmation::Confirm if ctx.cart.is_empty() => {
            Transition::to(next, Rejection::EmptyCartCheckout)
        }
        Confirmation::Confirm => Transition::to(
            next,
            Reply::OrderPlaced {
                total: ctx.cart.total(),
            },
        )
        .with_effect(Effect::PlaceOrder),
        Confirmation::Decline => {
            Transition::to(next, Reply::CheckoutDeclined).with_effect(Effect::ClearCart)
        }
    }
}
