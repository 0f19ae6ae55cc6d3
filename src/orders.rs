//! Orders
//!
//! The order draft assembled at checkout submission: a deep snapshot of the
//! cart, the derived pricing, and the customer's contact and shipping
//! details. Once payment succeeds the draft is stamped into an immutable
//! completed order.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{cart::CartLine, money::Minor, pricing::Quote, products::ProductId};

/// Client-generated, time-based order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate an identifier: prefix plus the last six digits of the
    /// timestamp's epoch milliseconds, zero-padded.
    pub fn generate(prefix: &str, at: Timestamp) -> Self {
        let suffix = at.as_millisecond().rem_euclid(1_000_000);

        Self(format!("{prefix}{suffix:06}"))
    }

    /// The identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checkout submission rejected because required fields are empty.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required fields: {}", self.missing.join(", "))]
pub struct ValidationError {
    /// The required fields that were empty.
    pub missing: SmallVec<[&'static str; 7]>,
}

/// Customer contact and shipping details. All fields are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State.
    pub state: String,

    /// Postal (PIN) code.
    pub postal_code: String,
}

impl CustomerInfo {
    /// Check every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming each empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
        ];

        let missing: SmallVec<[&'static str; 7]> = fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

/// A cart line as snapshotted into an order. Copied, never referenced: later
/// cart mutations must not alter a submitted draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Catalog product identifier.
    pub product_id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: Minor,

    /// Number of units.
    pub quantity: u32,

    /// Optional size variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Reference to the product image.
    pub image: String,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            size: line.size.clone(),
            image: line.image.clone(),
        }
    }
}

/// The order snapshot assembled at checkout submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Client-generated order identifier.
    pub id: OrderId,

    /// When the draft was assembled.
    pub created_at: Timestamp,

    /// Snapshot of the cart lines at submission time.
    pub items: Vec<OrderItem>,

    /// Derived pricing at submission time.
    pub pricing: Quote,

    /// Customer contact and shipping details.
    pub customer: CustomerInfo,
}

impl OrderDraft {
    /// Assemble a draft from cart lines, pricing and validated customer
    /// details.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any required customer field is empty;
    /// no draft is produced in that case.
    pub fn assemble(
        id: OrderId,
        lines: &[CartLine],
        pricing: Quote,
        customer: CustomerInfo,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        customer.validate()?;

        Ok(Self {
            id,
            created_at,
            items: lines.iter().map(OrderItem::from).collect(),
            pricing,
            customer,
        })
    }

    /// Stamp the draft with the gateway's payment reference, producing the
    /// immutable completed order.
    pub fn stamp(self, payment_ref: impl Into<String>, completed_at: Timestamp) -> CompletedOrder {
        CompletedOrder {
            order: self,
            payment_ref: payment_ref.into(),
            completed_at,
        }
    }
}

/// An order whose payment has been confirmed. Immutable once stamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedOrder {
    order: OrderDraft,
    payment_ref: String,
    completed_at: Timestamp,
}

impl CompletedOrder {
    /// The underlying order snapshot.
    pub fn order(&self) -> &OrderDraft {
        &self.order
    }

    /// The gateway's payment reference.
    pub fn payment_ref(&self) -> &str {
        &self.payment_ref
    }

    /// When the payment was confirmed.
    pub fn completed_at(&self) -> Timestamp {
        self.completed_at
    }
}
