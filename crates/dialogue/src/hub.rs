//! Adapter between connection events and the dialogue state machine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::{ConnectionId, SessionId};
use ordering::{Catalog, Ledger};
use parking_lot::Mutex;

use crate::error::HubError;
use crate::machine::{Effect, HistoryScope, StepContext, step};
use crate::reply::Reply;
use crate::session::{SessionStore, SharedCart};
use crate::state::DialogueState;

/// Hub settings.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub history_scope: HistoryScope,
    pub session_ttl: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            history_scope: HistoryScope::Session,
            session_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

struct Connection {
    session: SessionId,
    cart: SharedCart,
    state: DialogueState,
}

/// Owns every live connection's dialogue state and applies transitions.
///
/// Each call to [`ConversationHub::handle_message`] runs parse, transition,
/// effect application and rendering while holding that connection's lock,
/// so transitions for one connection never interleave.
pub struct ConversationHub {
    catalog: Arc<Catalog>,
    ledger: Ledger,
    sessions: SessionStore,
    connections: Mutex<HashMap<ConnectionId, Arc<Mutex<Connection>>>>,
    history_scope: HistoryScope,
}

impl ConversationHub {
    pub fn new(catalog: Arc<Catalog>, ledger: Ledger, config: HubConfig) -> Self {
        Self {
            catalog,
            ledger,
            sessions: SessionStore::new(config.session_ttl),
            connections: Mutex::new(HashMap::new()),
            history_scope: config.history_scope,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Opens a connection for `session` and returns the greeting.
    ///
    /// The session's cart is restored if it is still alive; the dialogue
    /// itself always restarts by asking for a name.
    #[tracing::instrument(skip(self))]
    pub fn connect(&self, connection: ConnectionId, session: SessionId) -> Result<String, HubError> {
        let mut connections = self.connections.lock();
        if connections.contains_key(&connection) {
            return Err(HubError::DuplicateConnection(connection));
        }
        let cart = self.sessions.attach(session);
        connections.insert(
            connection,
            Arc::new(Mutex::new(Connection {
                session,
                cart,
                state: DialogueState::new(),
            })),
        );
        metrics::gauge!("connections_active").set(connections.len() as f64);
        drop(connections);

        tracing::info!("user connected");
        Ok(Reply::Greeting.to_string())
    }

    /// Interprets one inbound message and returns the single reply.
    #[tracing::instrument(skip(self, text))]
    pub fn handle_message(&self, connection: ConnectionId, text: &str) -> Result<String, HubError> {
        let handle = self
            .connections
            .lock()
            .get(&connection)
            .cloned()
            .ok_or(HubError::UnknownConnection(connection))?;
        let mut conn = handle.lock();
        let session = conn.session;
        let cart_handle = Arc::clone(&conn.cart);
        let mut cart = cart_handle.lock();

        let transition = {
            let ctx = StepContext {
                catalog: &self.catalog,
                cart: &cart,
                ledger: &self.ledger,
                session,
                history_scope: self.history_scope,
            };
            step(&conn.state, text, &ctx)
        };

        for effect in transition.effects {
            match effect {
                Effect::AddLine(line) => {
                    // `step` already verified the new total fits.
                    if let Err(e) = cart.push(line) {
                        tracing::warn!(error = %e, "line rejected while applying transition");
                    }
                }
                Effect::ClearCart => {
                    cart.clear();
                    metrics::counter!("orders_cancelled_total").increment(1);
                }
                Effect::PlaceOrder => {
                    let customer = conn.state.user_name().map(str::to_owned);
                    self.ledger.record(session, customer, cart.snapshot());
                    cart.clear();
                    metrics::counter!("orders_placed_total").increment(1);
                }
            }
        }
        drop(cart);

        if let Reply::Rejected(rejection) = &transition.reply {
            metrics::counter!("dialogue_rejections_total", "reason" => rejection.reason())
                .increment(1);
        }
        metrics::counter!("dialogue_messages_total").increment(1);

        tracing::debug!(
            from = %conn.state.phase(),
            to = %transition.next.phase(),
            "transition"
        );
        conn.state = transition.next;
        drop(conn);

        self.sessions.touch(session);
        Ok(transition.reply.to_string())
    }

    /// Drops the connection's dialogue state. The session cart is kept.
    #[tracing::instrument(skip(self))]
    pub fn disconnect(&self, connection: ConnectionId) {
        let mut connections = self.connections.lock();
        if connections.remove(&connection).is_some() {
            metrics::gauge!("connections_active").set(connections.len() as f64);
            tracing::info!("user disconnected");
        }
    }

    /// Current dialogue state of a connection.
    pub fn dialogue_state(&self, connection: ConnectionId) -> Option<DialogueState> {
        let handle = self.connections.lock().get(&connection).cloned()?;
        let state = handle.lock().state.clone();
        Some(state)
    }

    /// Number of lines in the cart attached to a connection.
    pub fn cart_len(&self, connection: ConnectionId) -> Option<usize> {
        let handle = self.connections.lock().get(&connection).cloned()?;
        let cart = Arc::clone(&handle.lock().cart);
        let len = cart.lock().len();
        Some(len)
    }

    pub fn active_connections(&self) -> usize {
        self.connections.lock().len()
    }

    /// Number of sessions whose carts are currently retained.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Evicts idle session carts; returns how many were removed.
    pub fn prune_sessions(&self) -> usize {
        let removed = self.sessions.prune();
        if removed > 0 {
            tracing::info!(removed, "pruned idle sessions");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> ConversationHub {
        ConversationHub::new(
            Arc::new(Catalog::standard()),
            Ledger::new(),
            HubConfig::default(),
        )
    }

    #[test]
    fn test_connect_greets() {
        let hub = hub();
        let greeting = hub.connect(ConnectionId::new(), SessionId::new()).unwrap();
        assert_eq!(greeting, "Hello! What's your name?");
        assert_eq!(hub.active_connections(), 1);
    }

    #[test]
    fn test_duplicate_connect_rejected() {
        let hub = hub();
        let conn = ConnectionId::new();
        hub.connect(conn, SessionId::new()).unwrap();
        assert_eq!(
            hub.connect(conn, SessionId::new()),
            Err(HubError::DuplicateConnection(conn))
        );
        assert_eq!(hub.active_connections(), 1);
        assert_eq!(hub.active_sessions(), 1);
    }

    #[test]
    fn test_message_for_unknown_connection() {
        let hub = hub();
        let conn = ConnectionId::new();
        assert_eq!(
            hub.handle_message(conn, "hi"),
            Err(HubError::UnknownConnection(conn))
        );
    }

    #[test]
    fn test_disconnect_discards_state() {
        let hub = hub();
        let conn = ConnectionId::new();
        hub.connect(conn, SessionId::new()).unwrap();
        hub.handle_message(conn, "Amy").unwrap();

        hub.disconnect(conn);
        assert_eq!(hub.active_connections(), 0);
        assert!(hub.dialogue_state(conn).is_none());
        assert!(hub.handle_message(conn, "1").is_err());
    }
}
