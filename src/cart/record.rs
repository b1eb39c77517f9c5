//! Deserialization path for persisted carts.
//!
//! Only the line items are read back. Stored totals are ignored and folded
//! again from the items, and a blob that breaks a cart invariant is refused.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use super::{CartLineItem, CartState};
use crate::catalog::ProductId;

#[derive(Deserialize)]
pub struct CartRecord {
    items: Vec<CartLineItem>,
}

/// Why a decoded cart was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartRecordError {
    DuplicateProduct(ProductId),
    ZeroQuantity(ProductId),
    /// The quantities add up to more than `u32::MAX` items.
    QuantityOverflow,
}

impl fmt::Display for CartRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartRecordError::DuplicateProduct(id) => {
                write!(f, "cart holds more than one line for product {}", id)
            }
            CartRecordError::ZeroQuantity(id) => {
                write!(f, "cart line for product {} has quantity 0", id)
            }
            CartRecordError::QuantityOverflow => {
                write!(f, "cart quantities exceed {} items", u32::MAX)
            }
        }
    }
}

impl std::error::Error for CartRecordError {}

impl TryFrom<CartRecord> for CartState {
    type Error = CartRecordError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(record.items.len());
        let mut count: u32 = 0;
        for item in &record.items {
            if item.quantity == 0 {
                return Err(CartRecordError::ZeroQuantity(item.product.id));
            }
            if !seen.insert(item.product.id) {
                return Err(CartRecordError::DuplicateProduct(item.product.id));
            }
            count = count
                .checked_add(item.quantity)
                .ok_or(CartRecordError::QuantityOverflow)?;
        }

        let mut cart = CartState {
            items: record.items,
            ..CartState::default()
        };
        cart.recalculate();
        Ok(cart)
    }
}
