use crate::cart::CartAction;
use crate::catalog::CatalogAction;

/// Anything that can be dispatched to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Cart(CartAction),
    Catalog(CatalogAction),
}

impl Action {
    /// Stable `slice/operation` name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Cart(CartAction::Add(_)) => "cart/addToCart",
            Action::Cart(CartAction::Remove(_)) => "cart/removeFromCart",
            Action::Cart(CartAction::Increment(_)) => "cart/incrementQuantity",
            Action::Cart(CartAction::Decrement(_)) => "cart/decrementQuantity",
            Action::Cart(CartAction::Clear) => "cart/clearCart",
            Action::Catalog(CatalogAction::SetLoading(_)) => "products/setLoading",
            Action::Catalog(CatalogAction::SetProducts(_)) => "products/setProducts",
            Action::Catalog(CatalogAction::SetError(_)) => "products/setError",
            Action::Catalog(CatalogAction::SetSearchQuery(_)) => "products/setSearchQuery",
        }
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<CatalogAction> for Action {
    fn from(action: CatalogAction) -> Self {
        Action::Catalog(action)
    }
}
