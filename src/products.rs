//! Products

use serde::{Deserialize, Serialize};

use crate::money::Minor;

/// Catalog product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier from a catalog key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw catalog key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The catalog-side details a cart line snapshots when a product is added.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRef {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: Minor,

    /// Reference to the product image.
    pub image: String,

    /// Optional catalog category.
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_round_trips_its_key() {
        let id = ProductId::new("ring-001");

        assert_eq!(id.as_str(), "ring-001");
        assert_eq!(id.to_string(), "ring-001");
    }
}
