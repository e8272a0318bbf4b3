//! Per-connection conversation state.

use ordering::MenuItem;

/// The phase of a conversation.
///
/// Phase transitions:
/// ```text
/// AwaitingName ──► MainMenu ◄───────────────────────────────┐
///                    ├──► AwaitingItemSelection ──┐         │
///                    ├──► AwaitingQuantity ◄──────┘ ────────┤
///                    └──► AwaitingCheckoutConfirmation ─────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the user's display name.
    #[default]
    AwaitingName,

    MainMenu,

    /// The catalog was shown; waiting for an item code.
    AwaitingItemSelection,

    /// An item was selected; waiting for how many.
    AwaitingQuantity { item: MenuItem },

    /// The checkout summary was shown; waiting for `1` to confirm.
    AwaitingCheckoutConfirmation,
}

impl Phase {
    /// Returns the phase name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::AwaitingName => "AwaitingName",
            Phase::MainMenu => "MainMenu",
            Phase::AwaitingItemSelection => "AwaitingItemSelection",
            Phase::AwaitingQuantity { .. } => "AwaitingQuantity",
            Phase::AwaitingCheckoutConfirmation => "AwaitingCheckoutConfirmation",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conversation state owned by one connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueState {
    phase: Phase,
    user_name: Option<String>,
}

impl DialogueState {
    /// State of a freshly connected user.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Same state in a different phase.
    pub fn with_phase(&self, phase: Phase) -> Self {
        Self {
            phase,
            user_name: self.user_name.clone(),
        }
    }

    /// Same state with the display name set.
    pub fn with_user_name(&self, name: impl Into<String>) -> Self {
        Self {
            phase: self.phase.clone(),
            user_name: Some(name.into()),
        }
    }
}
