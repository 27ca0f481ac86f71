//! Application state and the reductions applied to API responses.
//!
//! Each field mirrors one store slice of the original frontend: the
//! product listing, the featured shelf, the cart, and the caller's
//! orders. Responses replace the slice wholesale; there is no partial
//! merging.

use crate::resource::Resource;
use crate::ui::UiState;
use smartcart_commerce::catalog::Product;
use smartcart_commerce::order::Order;
use smartcart_store::{CartView, ProductPage};

/// Root application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub products: Resource<ProductPage>,
    pub featured: Resource<Vec<Product>>,
    pub cart: Resource<CartView>,
    pub orders: Resource<Vec<Order>>,
    pub ui: UiState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Product listing ----

    pub fn products_loading(&mut self) {
        self.products = Resource::Loading;
    }

    pub fn products_resolved(&mut self, result: Result<ProductPage, impl std::fmt::Display>) {
        self.products.resolve(result);
    }

    pub fn featured_resolved(&mut self, result: Result<Vec<Product>, impl std::fmt::Display>) {
        self.featured.resolve(result);
    }

    // ---- Cart ----

    pub fn cart_loading(&mut self) {
        self.cart = Resource::Loading;
    }

    /// Every cart mutation returns the whole cart; the slice is
    /// replaced, never merged.
    pub fn cart_resolved(&mut self, result: Result<CartView, impl std::fmt::Display>) {
        self.cart.resolve(result);
    }

    /// Reset to the empty shape, e.g. after a successful checkout.
    pub fn cart_cleared(&mut self) {
        self.cart = Resource::Ready(CartView::empty());
    }

    /// Item count for the cart badge; zero while not loaded.
    pub fn cart_count(&self) -> i64 {
        self.cart.ready().map(|c| c.total_items).unwrap_or(0)
    }

    // ---- Orders ----

    pub fn orders_loading(&mut self) {
        self.orders = Resource::Loading;
    }

    pub fn orders_resolved(&mut self, result: Result<Vec<Order>, impl std::fmt::Display>) {
        self.orders.resolve(result);
    }

    /// A just-placed order goes to the front of the list and the cart
    /// resets, matching the checkout flow.
    pub fn order_placed(&mut self, order: Order) {
        if let Resource::Ready(orders) = &mut self.orders {
            orders.insert(0, order);
        } else {
            self.orders = Resource::Ready(vec![order]);
        }
        self.cart_cleared();
    }
}
