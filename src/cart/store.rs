//! Cart Store
//!
//! Owns the authoritative client-side cart state and keeps it consistent
//! with the durable slot. Storage and analytics are injected ports; every
//! mutation goes state change → persist → signal, in that order.
//!
//! Failure semantics follow the degraded-but-usable rule: a slot that cannot
//! be read falls back to the empty cart, and a failed write keeps the
//! in-memory state. Both are logged, neither is surfaced.

use std::fmt;

use crate::{
    analytics::{AnalyticsEvent, AnalyticsSink},
    cart::{AddOutcome, CartLine, CartState, LineKey, records::CartRecord},
    money::Minor,
    storage::CartStorage,
};

/// Cart store: in-memory state plus injected storage and analytics ports.
pub struct CartStore {
    state: CartState,
    storage: Box<dyn CartStorage>,
    analytics: Box<dyn AnalyticsSink>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open a store over the given ports, loading any persisted cart.
    ///
    /// A slot that cannot be read or decoded is logged and treated as empty.
    pub fn open(
        storage: impl CartStorage + 'static,
        analytics: impl AnalyticsSink + 'static,
    ) -> Self {
        let state = match storage.load() {
            Ok(Some(record)) => record.into_state(),
            Ok(None) => CartState::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load persisted cart; starting empty");
                CartState::new()
            }
        };

        Self {
            state,
            storage: Box::new(storage),
            analytics: Box::new(analytics),
        }
    }

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Derived cart total in minor units.
    pub fn total(&self) -> Minor {
        self.state.total()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// The injected analytics sink, for collaborators firing their own
    /// signals (checkout, purchase).
    pub fn analytics(&self) -> &dyn AnalyticsSink {
        self.analytics.as_ref()
    }

    /// Add a line, merging by identity key. Fires an item-added signal only
    /// when the line is newly inserted.
    pub fn add_item(&mut self, line: CartLine) -> AddOutcome {
        let signal = AnalyticsEvent::ItemAdded {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        };

        let outcome = self.state.add_item(line);
        self.persist();

        if outcome == AddOutcome::Inserted {
            self.analytics.record(signal);
        }

        outcome
    }

    /// Remove the line with the given identity key.
    pub fn remove_item(&mut self, key: &LineKey) {
        self.state.remove_item(key);
        self.persist();
    }

    /// Set a line's quantity to an absolute value; zero removes the line.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) {
        self.state.update_quantity(key, quantity);
        self.persist();
    }

    /// Reset to the empty cart.
    pub fn clear(&mut self) {
        self.state.clear();
        self.persist();
    }

    fn persist(&self) {
        let record = CartRecord::from(&self.state);

        if let Err(err) = self.storage.save(&record) {
            tracing::warn!(error = %err, "failed to persist cart; keeping in-memory state");
        }
    }
}
