//! Conversation layer of the ordering bot.
//!
//! This crate provides:
//! - Typed parsing of raw chat text into menu commands and quantities
//! - The dialogue phases and the pure `step` transition function
//! - Reply rendering
//! - `SessionStore` for carts that survive reconnects
//! - `ConversationHub`, which maps connection events onto the state machine

pub mod command;
pub mod error;
pub mod hub;
pub mod machine;
pub mod reply;
pub mod session;
pub mod state;

pub use command::{Confirmation, MenuCommand, QuantityInput};
pub use error::HubError;
pub use hub::{ConversationHub, HubConfig};
pub use machine::{Effect, HistoryScope, StepContext, Transition, step};
pub use reply::{Rejection, Reply};
pub use session::SessionStore;
pub use state::{DialogueState, Phase};
