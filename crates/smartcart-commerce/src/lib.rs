//! Storefront domain types and logic for SmartCart.
//!
//! This crate provides the document models and pure business rules behind the
//! SmartCart storefront:
//!
//! - **Catalog**: products, categories, stock
//! - **Cart**: per-user cart with line items and price snapshots
//! - **Order**: immutable checkout snapshots with a status state machine
//! - **Pricing**: fixed tax/shipping checkout formulas
//!
//! # Example
//!
//! ```rust
//! use smartcart_commerce::prelude::*;
//!
//! let product = Product::new("Rust Programming Book", Category::Books, Money::new(4999, Currency::USD), 10);
//!
//! let mut cart = Cart::new(UserId::new("user-1"));
//! cart.add_item(product.id.clone(), 2, product.price).unwrap();
//!
//! let pricing = CheckoutPricing::compute(cart.total_price().unwrap()).unwrap();
//! println!("Total: {}", pricing.total_price.display());
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, ProductUpdate};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartTotals};

    // Orders
    pub use crate::order::{Order, OrderItem, OrderStatus, PaymentMethod, ShippingAddress};

    // Pricing
    pub use crate::pricing::CheckoutPricing;
}
