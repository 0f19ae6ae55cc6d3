//! Analytics
//!
//! Best-effort shopping signals. Sinks must never influence cart or checkout
//! state; the store fires them after the state change has already happened.

use std::{cell::RefCell, rc::Rc};

use mockall::automock;

use crate::{money::Minor, products::ProductId};

/// A shopping signal.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    /// A line was newly inserted into the cart (not a quantity bump).
    ItemAdded {
        /// Catalog product identifier.
        product_id: ProductId,

        /// Display name.
        name: String,

        /// Unit price in minor units.
        unit_price: Minor,

        /// Quantity added.
        quantity: u32,
    },

    /// The shopper reached the checkout with a non-empty cart.
    BeginCheckout {
        /// Number of cart lines.
        line_count: usize,

        /// Payable amount in minor units.
        total: Minor,
    },

    /// A payment was confirmed.
    Purchase {
        /// Generated order identifier.
        order_id: String,

        /// Paid amount in minor units.
        total: Minor,
    },
}

/// Sink for shopping signals.
#[automock]
pub trait AnalyticsSink {
    /// Record a signal. Must not fail; drop on the floor if need be.
    fn record(&self, event: AnalyticsEvent);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn record(&self, _event: AnalyticsEvent) {}
}

/// Sink that emits signals as structured log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalytics;

impl AnalyticsSink for LogAnalytics {
    fn record(&self, event: AnalyticsEvent) {
        match event {
            AnalyticsEvent::ItemAdded {
                product_id,
                name,
                unit_price,
                quantity,
            } => {
                tracing::info!(%product_id, name = %name, unit_price, quantity, "item added to cart");
            }
            AnalyticsEvent::BeginCheckout { line_count, total } => {
                tracing::info!(line_count, total, "checkout begun");
            }
            AnalyticsEvent::Purchase { order_id, total } => {
                tracing::info!(order_id = %order_id, total, "purchase confirmed");
            }
        }
    }
}

/// Sink that records every signal for inspection. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    events: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl RecordingAnalytics {
    /// An empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All signals recorded so far.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn record(&self, event: AnalyticsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_events_in_order() {
        let sink = RecordingAnalytics::new();
        let handle = sink.clone();

        sink.record(AnalyticsEvent::BeginCheckout {
            line_count: 2,
            total: 4300_00,
        });
        sink.record(AnalyticsEvent::Purchase {
            order_id: "VN123456".to_owned(),
            total: 4300_00,
        });

        let events = handle.events();

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events.first(),
            Some(AnalyticsEvent::BeginCheckout { line_count: 2, .. })
        ));
    }
}
