//! Checkout
//!
//! The payment flow as an explicit state machine rather than ad hoc flags:
//! `Idle → AwaitingGateway → Completed | Failed`, with single-fire guards so
//! a double submit or a late gateway callback cannot mutate state twice.
//!
//! The gateway itself is external; this module consumes its callback events.
//! On success the flow stamps the draft, clears the cart store, dispatches a
//! best-effort confirmation and purchase signal, and hands back the completed
//! order. On failure or dismiss the cart is left untouched for a user retry.

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    analytics::AnalyticsEvent,
    cart::store::CartStore,
    money::{CURRENCY_CODE, Minor},
    notifications::NotificationSender,
    orders::{CompletedOrder, OrderDraft, ValidationError},
};

/// Phases of the checkout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// No payment in flight.
    #[default]
    Idle,

    /// The gateway has been opened; waiting for its callback.
    AwaitingGateway,

    /// Payment confirmed and the order completed.
    Completed,

    /// The gateway reported failure, or the shopper dismissed it.
    Failed,
}

impl std::fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self {
            Self::Idle => "idle",
            Self::AwaitingGateway => "awaiting-gateway",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };

        f.write_str(phase)
    }
}

/// Callback events from the external payment gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    /// Payment collected; carries the gateway's payment reference.
    Success {
        /// Gateway payment reference.
        payment_ref: String,
    },

    /// The gateway reported a payment failure.
    Failed {
        /// Gateway-supplied failure description.
        reason: String,
    },

    /// The shopper closed the gateway without paying.
    Dismissed,
}

/// What the external gateway widget is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    /// Amount to collect, in minor units.
    pub amount: Minor,

    /// ISO currency code.
    pub currency: &'static str,

    /// Human-readable description shown by the widget.
    pub description: String,
}

/// Errors surfaced by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("cart is empty; nothing to check out")]
    EmptyCart,

    /// The flow was asked to do something its current phase forbids.
    #[error("cannot {action} while checkout is {phase}")]
    InvalidTransition {
        /// The flow's current phase.
        phase: CheckoutPhase,

        /// What was attempted.
        action: &'static str,
    },

    /// Required customer fields were empty.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The gateway reported a payment failure. Cart state is preserved.
    #[error("payment failed: {reason}")]
    PaymentFailed {
        /// Gateway-supplied failure description.
        reason: String,
    },

    /// The shopper dismissed the gateway. Cart state is preserved.
    #[error("payment cancelled")]
    PaymentCancelled,
}

/// The checkout payment flow.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
    draft: Option<OrderDraft>,
}

impl CheckoutFlow {
    /// A fresh, idle flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// The flow's current phase.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Submit a draft and produce the request the gateway widget is opened
    /// with. Fires the begin-checkout signal through the cart's sink.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`]: a payment is already in
    ///   flight or the flow has finished (double-submit guard).
    /// - [`CheckoutError::EmptyCart`]: the draft carries no items.
    pub fn begin(
        &mut self,
        draft: OrderDraft,
        cart: &CartStore,
    ) -> Result<GatewayRequest, CheckoutError> {
        if self.phase != CheckoutPhase::Idle {
            return Err(CheckoutError::InvalidTransition {
                phase: self.phase,
                action: "submit an order",
            });
        }

        if draft.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        cart.analytics().record(AnalyticsEvent::BeginCheckout {
            line_count: draft.items.len(),
            total: draft.pricing.total,
        });

        let request = GatewayRequest {
            amount: draft.pricing.total,
            currency: CURRENCY_CODE,
            description: format!("Order #{}", draft.id),
        };

        self.draft = Some(draft);
        self.phase = CheckoutPhase::AwaitingGateway;

        Ok(request)
    }

    /// Consume a gateway callback.
    ///
    /// On success: stamps the draft, clears the cart store, dispatches the
    /// confirmation (best-effort; a failure is logged and does not block
    /// completion), fires the purchase signal and returns the completed
    /// order. On failure or dismiss: leaves the cart untouched and surfaces
    /// the error; no automatic retry.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`]: no payment is in flight
    ///   (single-fire guard; state is unchanged).
    /// - [`CheckoutError::PaymentFailed`] / [`CheckoutError::PaymentCancelled`]:
    ///   the gateway did not collect payment.
    pub fn on_gateway_event(
        &mut self,
        event: GatewayEvent,
        cart: &mut CartStore,
        notifier: &dyn NotificationSender,
    ) -> Result<CompletedOrder, CheckoutError> {
        if self.phase != CheckoutPhase::AwaitingGateway {
            return Err(CheckoutError::InvalidTransition {
                phase: self.phase,
                action: "handle a gateway result",
            });
        }

        match event {
            GatewayEvent::Success { payment_ref } => {
                let Some(draft) = self.draft.take() else {
                    // Guarded by the phase check; a flow awaiting the
                    // gateway always holds a draft.
                    return Err(CheckoutError::InvalidTransition {
                        phase: self.phase,
                        action: "handle a gateway result",
                    });
                };

                let completed = draft.stamp(payment_ref, Timestamp::now());

                cart.clear();

                if let Err(err) = notifier.send(&completed) {
                    tracing::warn!(
                        error = %err,
                        order_id = %completed.order().id,
                        "confirmation dispatch failed; order completion unaffected"
                    );
                }

                cart.analytics().record(AnalyticsEvent::Purchase {
                    order_id: completed.order().id.to_string(),
                    total: completed.order().pricing.total,
                });

                self.phase = CheckoutPhase::Completed;

                Ok(completed)
            }
            GatewayEvent::Failed { reason } => {
                self.phase = CheckoutPhase::Failed;

                Err(CheckoutError::PaymentFailed { reason })
            }
            GatewayEvent::Dismissed => {
                self.phase = CheckoutPhase::Failed;

                Err(CheckoutError::PaymentCancelled)
            }
        }
    }

    /// Re-arm a failed flow for a user-initiated resubmission.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless the flow is in the
    /// `Failed` phase.
    pub fn retry(&mut self) -> Result<(), CheckoutError> {
        if self.phase != CheckoutPhase::Failed {
            return Err(CheckoutError::InvalidTransition {
                phase: self.phase,
                action: "retry",
            });
        }

        self.draft = None;
        self.phase = CheckoutPhase::Idle;

        Ok(())
    }
}
