//! The cart collection and its derived totals.
//!
//! A cart is an ordered sequence of line items, at most one per product id,
//! in first-add order. All operations here are pure in-memory state
//! transitions; persistence and rendering live in the storefront crate,
//! which reloads the cart from the session store, applies one operation,
//! and writes it back wholesale.
//!
//! Invariants maintained by every public operation:
//! - at most one line per product id (re-adds increment the quantity)
//! - `quantity >= 1` on every line (a mutation that would reach zero
//!   removes the line instead)
//! - insertion order is first-add order and survives re-adds

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Subtotals at or above this amount (in pesos) ship free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 15_000;

/// Flat shipping fee (in pesos) below the free-shipping threshold.
pub const SHIPPING_FEE: i64 = 1_500;

/// One cart entry: a product reference plus the product fields captured at
/// add time.
///
/// `name`, `price` and `image` are denormalized copies frozen when the
/// product was first added; later catalog changes do not touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Derived order totals.
///
/// A pure function of the current line items, recomputed on every render
/// and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl CartTotals {
    /// Whether the order qualified for free shipping.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping == Price::ZERO
    }
}

/// The cart: an ordered sequence of [`CartLine`]s.
///
/// Serializes transparently as a JSON array, which is the persisted session
/// representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The line items, in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not the item count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of `product`.
    ///
    /// If a line for this product exists its quantity is incremented;
    /// otherwise a new line with quantity 1 is appended, capturing the
    /// product's name, price and image. Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        });
        1
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero removes the line (quantities below one never
    /// exist). No-op when no line matches.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product_id == id) {
            line.quantity = quantity;
        }
    }

    /// Remove the line for `id`. No-op when no line matches.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product_id != id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .map(|line| line.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Compute subtotal, shipping and total for the current lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal: Price = self.lines.iter().map(CartLine::line_total).sum();
        let shipping = if subtotal >= Price::from_pesos(FREE_SHIPPING_THRESHOLD) {
            Price::ZERO
        } else {
            Price::from_pesos(SHIPPING_FEE)
        };

        CartTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}
