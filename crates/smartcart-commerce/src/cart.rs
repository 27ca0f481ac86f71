//! Cart and line item types.
//!
//! The cart is owned one-to-one by a user. Line items carry a price
//! snapshot taken when the item was added; totals are derived from the
//! items, never stored authoritatively.

use crate::error::CommerceError;
use crate::ids::{CartItemId, ProductId, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Owning user.
    pub user_id: UserId,
    /// Items in the cart, in insertion order.
    pub items: Vec<CartItem>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        let now = crate::catalog::current_timestamp();
        Self {
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an item to the cart.
    ///
    /// If the product is already present, the quantities merge and the
    /// line price re-snapshots to the given (current catalog) price.
    /// Stock validation happens in the store layer before this is called.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        price: Money,
    ) -> Result<CartItemId, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            existing.price = price;
            self.updated_at = crate::catalog::current_timestamp();
            return Ok(existing.id.clone());
        }

        let item = CartItem::new(product_id, quantity, price);
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = crate::catalog::current_timestamp();
        Ok(id)
    }

    /// Set an item's quantity. Does not re-snapshot the price.
    pub fn set_quantity(
        &mut self,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == item_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(item_id.to_string()))?;
        item.quantity = quantity;
        self.updated_at = crate::catalog::current_timestamp();
        Ok(())
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, item_id: &CartItemId) -> Result<(), CommerceError> {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        if self.items.len() == len_before {
            return Err(CommerceError::ItemNotInCart(item_id.to_string()));
        }
        self.updated_at = crate::catalog::current_timestamp();
        Ok(())
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = crate::catalog::current_timestamp();
    }

    /// Get an item by ID.
    pub fn get_item(&self, item_id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }

    /// Get an item by product ID.
    pub fn get_item_by_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Derived total price over all lines.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(Currency::USD);
        for item in &self.items {
            let line = item.line_total()?;
            total = total.try_add(&line).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    /// Derived totals for the response shape.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        Ok(CartTotals {
            total_items: self.item_count(),
            total_price: self.total_price()?,
        })
    }
}

/// Derived cart totals (convenience caching only, per the response shape).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    pub total_items: i64,
    pub total_price: Money,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique line item identifier.
    pub id: CartItemId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Quantity (>= 1).
    pub quantity: i64,
    /// Price snapshot taken at add-time.
    pub price: Money,
}

impl CartItem {
    /// Create a new line item.
    pub fn new(product_id: ProductId, quantity: i64, price: Money) -> Self {
        Self {
            id: CartItemId::generate(),
            product_id,
            quantity,
            price,
        }
    }

    /// Line total (price * quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}
