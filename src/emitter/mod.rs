//! Emitter - Fan store changes out to `event_emitter_rs` listeners.
//!
//! Store listeners run synchronously inside `dispatch`. Consumers that live
//! elsewhere (other threads, loggers, bridges) can instead register on an
//! `EventEmitter` and receive a JSON snapshot of whichever slice changed.
//! Requires the `emitter` feature.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_state::emitter::{StoreEmitter, CART_CHANGED};
//! use storefront_state::EventEmitter;
//!
//! let mut events = EventEmitter::new();
//! events.on(CART_CHANGED, |json: String| println!("cart is now {}", json));
//!
//! StoreEmitter::new(events).attach(&mut store);
//! ```

use std::sync::Mutex;

use event_emitter_rs::EventEmitter;
use serde::Serialize;

use crate::store::{AppState, Store, SubscriptionId};

/// Emitted with the serialized cart after any cart change.
pub const CART_CHANGED: &str = "cart.changed";
/// Emitted with the serialized catalog after any catalog change.
pub const CATALOG_CHANGED: &str = "catalog.changed";

/// Compares each snapshot with the previous one and emits an event per
/// slice that differs.
pub struct StoreEmitter {
    emitter: EventEmitter,
    last: AppState,
}

impl StoreEmitter {
    pub fn new(emitter: EventEmitter) -> Self {
        Self {
            emitter,
            last: AppState::default(),
        }
    }

    /// Emit events for whatever changed since the last observed state.
    pub fn observe(&mut self, state: &AppState) {
        if state.cart != self.last.cart {
            self.emit_json(CART_CHANGED, &state.cart);
        }
        if state.catalog != self.last.catalog {
            self.emit_json(CATALOG_CHANGED, &state.catalog);
        }
        self.last = state.clone();
    }

    /// Subscribe to `store`, starting from its current state.
    pub fn attach(mut self, store: &mut Store) -> SubscriptionId {
        self.last = store.state().clone();
        let emitter = Mutex::new(self);
        store.subscribe(move |state| match emitter.lock() {
            Ok(mut emitter) => emitter.observe(state),
            Err(_) => tracing::warn!("store emitter lock poisoned, change not emitted"),
        })
    }

    fn emit_json<T: Serialize>(&mut self, event: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                self.emitter.emit(event, json);
            }
            Err(err) => tracing::warn!(event, error = %err, "failed to serialize change event"),
        }
    }
}
