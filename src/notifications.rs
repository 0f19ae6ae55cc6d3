//! Notifications
//!
//! Best-effort order-confirmation dispatch. A failed send is logged and
//! reported to the caller, but never blocks order completion.

use mockall::automock;
use thiserror::Error;

use crate::{money::format_inr, orders::CompletedOrder};

/// A failed confirmation dispatch.
#[derive(Debug, Error)]
#[error("confirmation dispatch failed: {0}")]
pub struct NotificationError(pub String);

/// Outbound channel for order confirmations.
#[automock]
pub trait NotificationSender {
    /// Send a confirmation for the given completed order.
    ///
    /// # Errors
    ///
    /// Returns a [`NotificationError`] if the dispatch failed.
    fn send(&self, order: &CompletedOrder) -> Result<(), NotificationError>;
}

/// Sender that does nothing, for demos and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSender;

impl NotificationSender for NoopSender {
    fn send(&self, _order: &CompletedOrder) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Assemble the human-readable confirmation body for an order.
pub fn confirmation_body(order: &CompletedOrder) -> String {
    let draft = order.order();
    let mut body = String::new();

    body.push_str(&format!("Hi {},\n\n", draft.customer.name));
    body.push_str(&format!(
        "Thank you for your order! Payment for order #{} has been received.\n\n",
        draft.id
    ));

    body.push_str("Items:\n");
    for item in &draft.items {
        let size = item
            .size
            .as_deref()
            .map(|s| format!(" (size {s})"))
            .unwrap_or_default();

        body.push_str(&format!(
            "  - {} x{}{} - {}\n",
            item.name,
            item.quantity,
            size,
            format_inr(item.unit_price * u64::from(item.quantity)),
        ));
    }

    body.push_str(&format!("\nSubtotal: {}\n", format_inr(draft.pricing.subtotal)));

    if draft.pricing.discount > 0 {
        body.push_str(&format!("Discount: -{}\n", format_inr(draft.pricing.discount)));
    }

    let shipping = if draft.pricing.shipping == 0 {
        "Free".to_owned()
    } else {
        format_inr(draft.pricing.shipping)
    };
    body.push_str(&format!("Shipping: {shipping}\n"));
    body.push_str(&format!("Total: {}\n\n", format_inr(draft.pricing.total)));

    body.push_str(&format!("Payment reference: {}\n", order.payment_ref()));
    body.push_str(
        "We'll send a shipping confirmation with tracking details once your order ships.\n",
    );

    body
}
