//! Cart Records
//!
//! Serialized shape of the durable cart slot: `{ items, total }`. Records are
//! the storage-facing mirror of [`CartState`]; the total is recomputed on the
//! way back in so a stale or hand-edited slot cannot desynchronise it.

use serde::{Deserialize, Serialize};

use crate::{
    cart::{CartLine, CartState},
    money::Minor,
    products::ProductId,
};

/// Persisted cart record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Persisted lines in insertion order.
    #[serde(default)]
    pub items: Vec<CartLineRecord>,

    /// Persisted total; informational only, recomputed on load.
    #[serde(default)]
    pub total: Minor,
}

/// Persisted cart line record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineRecord {
    /// Catalog product identifier.
    pub product_id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: Minor,

    /// Reference to the product image.
    pub image: String,

    /// Number of units.
    pub quantity: u32,

    /// Optional size variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Optional catalog category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&CartLine> for CartLineRecord {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            image: line.image.clone(),
            quantity: line.quantity,
            size: line.size.clone(),
            category: line.category.clone(),
        }
    }
}

impl From<CartLineRecord> for CartLine {
    fn from(record: CartLineRecord) -> Self {
        Self {
            product_id: record.product_id,
            name: record.name,
            unit_price: record.unit_price,
            image: record.image,
            quantity: record.quantity,
            size: record.size,
            category: record.category,
        }
    }
}

impl From<&CartState> for CartRecord {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.lines().iter().map(CartLineRecord::from).collect(),
            total: state.total(),
        }
    }
}

impl CartRecord {
    /// Rebuild the in-memory state, recomputing the total from the lines.
    pub fn into_state(self) -> CartState {
        CartState::from_lines(self.items.into_iter().map(CartLine::from).collect())
    }
}
