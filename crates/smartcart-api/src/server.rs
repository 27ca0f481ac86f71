//! Application context and the assembled route tree.

use crate::auth::SessionStore;
use crate::error;
use crate::routes as api_routes;
use smartcart_ai::TextGenerator;
use smartcart_commerce::catalog::{Category, Product};
use smartcart_commerce::money::{Currency, Money};
use smartcart_commerce::CommerceError;
use smartcart_store::Shop;
use std::sync::Arc;
use tracing::info;
use warp::{Filter, Reply};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppContext {
    pub shop: Arc<Shop>,
    pub sessions: Arc<SessionStore>,
    pub ai: Arc<TextGenerator>,
}

impl AppContext {
    pub fn new(shop: Shop, sessions: SessionStore, ai: TextGenerator) -> Self {
        Self {
            shop: Arc::new(shop),
            sessions: Arc::new(sessions),
            ai: Arc::new(ai),
        }
    }
}

/// The full API: all resource routes plus the rejection handler.
pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
    api_routes::products::routes(ctx.clone())
        .or(api_routes::cart::routes(ctx.clone()))
        .or(api_routes::orders::routes(ctx.clone()))
        .or(api_routes::ai::routes(ctx))
        .recover(error::handle_rejection)
}

/// Load a small demo catalog so the API is browsable out of the box.
pub fn seed_demo_catalog(shop: &Shop) -> Result<(), CommerceError> {
    let entries: &[(&str, &str, Category, i64, i64, bool)] = &[
        (
            "Wireless Headphones",
            "Over-ear Bluetooth headphones with 30-hour battery life.",
            Category::Electronics,
            7999,
            25,
            true,
        ),
        (
            "Smart Watch",
            "Fitness tracking, notifications, and a week of battery.",
            Category::Electronics,
            12999,
            15,
            true,
        ),
        (
            "Cotton T-Shirt",
            "Classic fit, 100% organic cotton.",
            Category::Clothing,
            1999,
            100,
            false,
        ),
        (
            "The Rust Programming Language",
            "The official book on Rust, covering everything from basics to advanced topics.",
            Category::Books,
            3999,
            40,
            true,
        ),
        (
            "Ceramic Coffee Mug",
            "12oz mug, dishwasher and microwave safe.",
            Category::Home,
            1299,
            60,
            false,
        ),
        (
            "Yoga Mat",
            "Non-slip 6mm mat with carrying strap.",
            Category::Sports,
            2499,
            30,
            false,
        ),
    ];

    for (name, description, category, price_cents, stock, featured) in entries {
        let mut product = Product::new(
            *name,
            *category,
            Money::new(*price_cents, Currency::USD),
            *stock,
        );
        product.description = (*description).to_string();
        product.featured = *featured;
        shop.create_product(product)?;
    }
    info!(count = entries.len(), "demo catalog seeded");
    Ok(())
}
