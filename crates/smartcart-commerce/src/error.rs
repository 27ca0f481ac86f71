//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Cart not found.
    #[error("Cart not found for user: {0}")]
    CartNotFound(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Item not in cart.
    #[error("Item not found in cart: {0}")]
    ItemNotInCart(String),

    /// Cannot create an order from an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Insufficient stock, reporting the available quantity.
    #[error("Only {available} items available in stock for {product}")]
    InsufficientStock {
        product: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity (must be at least 1).
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// Illegal order status transition.
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Caller does not own the resource.
    #[error("Not authorized")]
    NotAuthorized,

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
