//! Document store and shop service for SmartCart.
//!
//! Single-process document collections with the semantics the storefront
//! needs from its persistence layer, plus the [`Shop`] service that ties
//! catalog, carts, and orders together.
//!
//! The one piece of real consistency machinery lives in
//! [`catalog::CatalogStore::reserve_stock`]: the per-line stock check and
//! decrement happen under a single write lock, all-or-nothing, so two
//! concurrent checkouts of the same low-stock product cannot both pass
//! the check and drive stock negative.

pub mod carts;
pub mod catalog;
pub mod collection;
pub mod error;
pub mod orders;
pub mod shop;

pub use carts::CartStore;
pub use catalog::{CatalogStore, ProductFilter, ProductPage};
pub use collection::{Collection, Document};
pub use error::StoreError;
pub use orders::{OrderPage, OrderStats, OrderStore};
pub use shop::{CartLineView, CartView, Shop};
