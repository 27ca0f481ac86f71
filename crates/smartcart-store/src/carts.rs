//! Per-user cart store.

use crate::collection::{Collection, Document};
use crate::error::StoreError;
use smartcart_commerce::cart::Cart;
use smartcart_commerce::UserId;

impl Document for Cart {
    fn key(&self) -> String {
        self.user_id.to_string()
    }
}

/// Cart store, one cart per user.
///
/// Carts are created lazily on first use and never deleted, only
/// cleared.
#[derive(Default)]
pub struct CartStore {
    carts: Collection<Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a user's cart if one exists.
    pub fn get(&self, user_id: &UserId) -> Result<Option<Cart>, StoreError> {
        self.carts.get(user_id.as_str())
    }

    /// Get a user's cart, creating an empty one lazily.
    pub fn get_or_create(&self, user_id: &UserId) -> Result<Cart, StoreError> {
        if let Some(cart) = self.carts.get(user_id.as_str())? {
            return Ok(cart);
        }
        Ok(Cart::new(user_id.clone()))
    }

    /// Persist a cart.
    pub fn save(&self, cart: Cart) -> Result<(), StoreError> {
        self.carts.upsert(cart)
    }
}
