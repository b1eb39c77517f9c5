//! Display rounding. State keeps full precision; these run at render time.

use crate::cart::CartLineItem;
use crate::catalog::{Product, Rating};

/// `$` followed by the amount rounded to cents.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Rounded total for one cart line.
pub fn line_total(item: &CartLineItem) -> String {
    format_price(item.subtotal())
}

/// e.g. `4.1 (120 reviews)`.
pub fn format_rating(rating: &Rating) -> String {
    format!("{:.1} ({} reviews)", rating.rate, rating.count)
}

/// Confirmation shown after adding a product from its details view.
pub fn added_to_cart_message(product: &Product) -> String {
    format!("{} has been added to your cart.", product.title)
}
