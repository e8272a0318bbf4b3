//! Carts that outlive individual connections.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::SessionId;
use ordering::Cart;
use parking_lot::Mutex;

/// Shared handle to one session's cart.
pub type SharedCart = Arc<Mutex<Cart>>;

struct SessionSlot {
    cart: SharedCart,
    last_seen: Instant,
}

impl SessionSlot {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        // A cart still held by a live connection is never evicted.
        Arc::strong_count(&self.cart) == 1 && now.duration_since(self.last_seen) >= ttl
    }
}

/// Session-scoped storage: one cart per `SessionId`.
///
/// Slots idle for longer than the TTL are evicted, so a returning client
/// after that window starts with an empty cart.
pub struct SessionStore {
    slots: Mutex<HashMap<SessionId, SessionSlot>>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates a store whose idle slots expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the session's cart, creating an empty one for a new or
    /// expired session.
    pub fn attach(&self, session: SessionId) -> SharedCart {
        let now = Instant::now();
        let mut slots = self.slots.lock();

        if slots
            .get(&session)
            .is_some_and(|slot| slot.is_expired(self.ttl, now))
        {
            tracing::debug!(%session, "session expired, starting with an empty cart");
            slots.remove(&session);
        }

        let slot = slots.entry(session).or_insert_with(|| SessionSlot {
            cart: Arc::new(Mutex::new(Cart::new())),
            last_seen: now,
        });
        slot.last_seen = now;
        Arc::clone(&slot.cart)
    }

    /// Marks the session as active now.
    pub fn touch(&self, session: SessionId) {
        if let Some(slot) = self.slots.lock().get_mut(&session) {
            slot.last_seen = Instant::now();
        }
    }

    /// Evicts every expired slot and returns how many were removed.
    pub fn prune(&self) -> usize {
        let now = Instant::now();
        let mut slots = self.slots.lock();
        let before = slots.len();
        slots.retain(|_, slot| !slot.is_expired(self.ttl, now));
        before - slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use ordering::{Catalog, ItemCode};

    use super::*;

    const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    fn add_jollof(cart: &SharedCart) {
        let item = Catalog::standard()
            .resolve(ItemCode::new(100))
            .unwrap()
            .clone();
        cart.lock().add_line(item, NonZeroU32::new(1).unwrap()).unwrap();
    }

    #[test]
    fn test_attach_returns_same_cart_for_same_session() {
        let store = SessionStore::new(WEEK);
        let session = SessionId::new();

        let first = store.attach(session);
        add_jollof(&first);
        drop(first);

        let again = store.attach(session);
        assert_eq!(again.lock().len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new(WEEK);
        add_jollof(&store.attach(SessionId::new()));
        assert!(store.attach(SessionId::new()).lock().is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_expired_session_gets_fresh_cart() {
        let store = SessionStore::new(Duration::ZERO);
        let session = SessionId::new();
        add_jollof(&store.attach(session));

        assert!(store.attach(session).lock().is_empty());
    }

    #[test]
    fn test_prune_skips_carts_in_use() {
        let store = SessionStore::new(Duration::ZERO);
        let held = store.attach(SessionId::new());
        drop(store.attach(SessionId::new()));

        assert_eq!(store.prune(), 1);
        assert_eq!(store.len(), 1);
        drop(held);
        assert_eq!(store.prune(), 1);
        assert!(store.is_empty());
    }
}
