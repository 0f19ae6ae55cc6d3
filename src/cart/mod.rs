//! Cart
//!
//! The cart is a pure reducer over one in-memory record: an ordered list of
//! lines plus a derived total. All mutations are synchronous; the surrounding
//! [`store`] module owns persistence and analytics side effects.

use crate::{
    money::Minor,
    products::{ProductId, ProductRef},
};

pub mod records;
pub mod store;

/// Smallest quantity a line may carry after input clamping.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a line may carry after input clamping.
pub const MAX_QUANTITY: u32 = 10;

/// Clamp a requested quantity into the `[MIN_QUANTITY, MAX_QUANTITY]` range.
///
/// Clamping is an input-layer concern: the reducer itself applies quantities
/// verbatim, so callers taking raw user input should pass through here first.
pub fn clamp_quantity(quantity: u32) -> u32 {
    quantity.clamp(MIN_QUANTITY, MAX_QUANTITY)
}

/// Identity of a cart line: one product in one size variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Catalog product identifier.
    pub product_id: ProductId,

    /// Optional size variant.
    pub size: Option<String>,
}

impl LineKey {
    /// Build a line key from a product identifier and optional size.
    pub fn new(product_id: ProductId, size: Option<String>) -> Self {
        Self { product_id, size }
    }
}

/// One product+variant entry in the cart, with a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Catalog product identifier.
    pub product_id: ProductId,

    /// Display name snapshotted from the catalog.
    pub name: String,

    /// Unit price in minor units, snapshotted from the catalog.
    pub unit_price: Minor,

    /// Reference to the product image.
    pub image: String,

    /// Number of units.
    pub quantity: u32,

    /// Optional size variant; part of the line identity.
    pub size: Option<String>,

    /// Optional catalog category.
    pub category: Option<String>,
}

impl CartLine {
    /// Build a line from a catalog product reference.
    pub fn from_product(product: &ProductRef, quantity: u32, size: Option<String>) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            image: product.image.clone(),
            quantity,
            size,
            category: product.category.clone(),
        }
    }

    /// The identity key of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.size.clone())
    }

    /// Whether this line matches the given identity key.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size
    }

    /// The line's contribution to the cart total.
    pub fn line_total(&self) -> Minor {
        self.unit_price * Minor::from(self.quantity)
    }
}

/// Outcome of an [`CartState::add_item`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Inserted,

    /// An existing line with the same key absorbed the quantity.
    Merged,
}

/// Commands accepted by the cart reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add a line, merging by identity key.
    AddItem(CartLine),

    /// Remove the line with the given key.
    RemoveItem(LineKey),

    /// Set the quantity of the line with the given key (absolute, not delta).
    UpdateQuantity(LineKey, u32),

    /// Reset to the empty cart.
    Clear,
}

/// Cart state: lines in insertion order plus the derived total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
    total: Minor,
}

impl CartState {
    /// The empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from lines, recomputing the total.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut state = Self { lines, total: 0 };
        state.recompute_total();

        state
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Derived total: `Σ unit_price × quantity` over all lines.
    pub fn total(&self) -> Minor {
        self.total
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not units).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Look up a line by identity key.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Add a line. An existing line with the same identity key absorbs the
    /// incoming quantity; otherwise the line is appended.
    pub fn add_item(&mut self, line: CartLine) -> AddOutcome {
        let key = line.key();

        let outcome = match self.lines.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => {
                existing.quantity += line.quantity;
                AddOutcome::Merged
            }
            None => {
                self.lines.push(line);
                AddOutcome::Inserted
            }
        };

        self.recompute_total();

        outcome
    }

    /// Remove the line with the given identity key. Unknown keys are a no-op.
    pub fn remove_item(&mut self, key: &LineKey) {
        self.lines.retain(|line| !line.matches(key));
        self.recompute_total();
    }

    /// Set a line's quantity to an absolute value. A quantity of zero (or
    /// below) behaves exactly as [`CartState::remove_item`].
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove_item(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(key)) {
            line.quantity = quantity;
        }

        self.recompute_total();
    }

    /// Reset to the empty cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute_total();
    }

    /// Apply a reducer command.
    pub fn apply(&mut self, command: CartCommand) -> Option<AddOutcome> {
        match command {
            CartCommand::AddItem(line) => Some(self.add_item(line)),
            CartCommand::RemoveItem(key) => {
                self.remove_item(&key);
                None
            }
            CartCommand::UpdateQuantity(key, quantity) => {
                self.update_quantity(&key, quantity);
                None
            }
            CartCommand::Clear => {
                self.clear();
                None
            }
        }
    }

    fn recompute_total(&mut self) {
        self.total = self.lines.iter().map(CartLine::line_total).sum();
    }
}
