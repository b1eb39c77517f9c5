//! Cart - Line items with a running item count and amount.
//!
//! Every mutator folds the totals from the line items before it returns, so a
//! reader can never see totals that disagree with the items. Fields are
//! private for the same reason.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_state::{CartAction, CartState};
//!
//! let mut cart = CartState::new();
//! cart.add_to_cart(shirt.clone());
//! cart.add_to_cart(shirt);
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total_items(), 2);
//! ```

mod record;

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductId};

pub use record::CartRecordError;

/// One product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Unrounded `price * quantity`.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Mutations accepted by the cart slice.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Add(Product),
    Remove(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Clear,
}

/// What the checkout screen shows. Checkout itself is not processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutSummary {
    pub total_items: u32,
    pub subtotal: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "record::CartRecord")]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_items: u32,
    total_amount: f64,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Full-precision sum; round only when displaying.
    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.line(id).map(|item| item.quantity)
    }

    /// Add one unit of `product`, appending a new line if it is not in the
    /// cart yet.
    pub fn add_to_cart(&mut self, product: Product) {
        match self.position(product.id) {
            Some(index) => {
                let quantity = &mut self.items[index].quantity;
                *quantity = quantity.saturating_add(1);
            }
            None => self.items.push(CartLineItem {
                product,
                quantity: 1,
            }),
        }
        self.recalculate();
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.items.retain(|item| item.product.id != id);
        self.recalculate();
    }

    pub fn increment_quantity(&mut self, id: ProductId) {
        if let Some(index) = self.position(id) {
            let quantity = &mut self.items[index].quantity;
            *quantity = quantity.saturating_add(1);
        }
        self.recalculate();
    }

    /// Take one unit away. A line at quantity 1 is removed rather than
    /// kept at zero.
    pub fn decrement_quantity(&mut self, id: ProductId) {
        if let Some(index) = self.position(id) {
            if self.items[index].quantity > 1 {
                self.items[index].quantity -= 1;
            } else {
                self.items.remove(index);
            }
        }
        self.recalculate();
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Apply a single action to the slice.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add(product) => self.add_to_cart(product),
            CartAction::Remove(id) => self.remove_from_cart(id),
            CartAction::Increment(id) => self.increment_quantity(id),
            CartAction::Decrement(id) => self.decrement_quantity(id),
            CartAction::Clear => self.clear_cart(),
        }
    }

    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary {
            total_items: self.total_items,
            subtotal: self.total_amount,
            total: self.total_amount,
        }
    }

    fn line(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product.id == id)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == id)
    }

    fn recalculate(&mut self) {
        let (total_items, total_amount) = calculate_totals(&self.items);
        self.total_items = total_items;
        self.total_amount = total_amount;
    }
}

/// `(sum of quantities, sum of price * quantity)` over `items`. The item
/// count saturates at `u32::MAX`.
pub fn calculate_totals(items: &[CartLineItem]) -> (u32, f64) {
    items.iter().fold((0u32, 0.0), |(count, amount), item| {
        (count.saturating_add(item.quantity), amount + item.subtotal())
    })
}
