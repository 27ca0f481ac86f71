//! Product catalog routes.
//!
//! Listing, detail, featured shelf, and category index are public;
//! create, update, and delete require an admin session.

use crate::auth::{self, User};
use crate::error::ApiError;
use crate::routes::with_ctx;
use crate::server::AppContext;
use serde::Deserialize;
use smartcart_commerce::catalog::{Category, Product, ProductUpdate};
use smartcart_commerce::money::{Currency, Money};
use smartcart_commerce::ProductId;
use smartcart_store::ProductFilter;
use tracing::info;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Decimal price, e.g. `49.99`.
    pub price: f64,
    pub category: String,
    pub stock: i64,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
}

pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let list = warp::path!("api" / "products")
        .and(warp::get())
        .and(warp::query::<ProductQuery>())
        .and(with_ctx(ctx.clone()))
        .and_then(list_products);

    let featured = warp::path!("api" / "products" / "featured")
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(featured_products);

    let categories = warp::path!("api" / "products" / "categories")
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(list_categories);

    let detail = warp::path!("api" / "products" / String)
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(get_product);

    let create = warp::path!("api" / "products")
        .and(warp::post())
        .and(auth::admin(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(create_product);

    let update = warp::path!("api" / "products" / String)
        .and(warp::put())
        .and(auth::admin(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(update_product);

    let delete = warp::path!("api" / "products" / String)
        .and(warp::delete())
        .and(auth::admin(ctx.sessions.clone()))
        .and(with_ctx(ctx))
        .and_then(delete_product);

    // Static segments must win over the `:id` match.
    featured
        .or(categories)
        .or(list)
        .or(detail)
        .or(create)
        .or(update)
        .or(delete)
}

fn parse_category(name: &str) -> Result<Category, Rejection> {
    Category::from_str(name)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid category: {name}")).reject())
}

async fn list_products(
    query: ProductQuery,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let category = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(name) => Some(parse_category(name)?),
        None => None,
    };
    let filter = ProductFilter {
        search: query.search.filter(|s| !s.is_empty()),
        category,
        page: query.page.unwrap_or(0),
        limit: query.limit.unwrap_or(0),
    };
    let page = ctx.shop.list_products(&filter).map_err(reject)?;
    Ok(warp::reply::json(&page))
}

async fn featured_products(ctx: AppContext) -> Result<impl Reply, Rejection> {
    let products = ctx.shop.featured_products().map_err(reject)?;
    Ok(warp::reply::json(&products))
}

async fn list_categories(ctx: AppContext) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&ctx.shop.categories()))
}

async fn get_product(id: String, ctx: AppContext) -> Result<impl Reply, Rejection> {
    let product = ctx.shop.get_product(&ProductId::new(id)).map_err(reject)?;
    Ok(warp::reply::json(&product))
}

async fn create_product(
    user: User,
    request: CreateProductRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let category = parse_category(&request.category)?;
    let price = Money::from_decimal(request.price, Currency::USD);
    let mut product = Product::new(request.name, category, price, request.stock);
    if let Some(description) = request.description {
        product.description = description;
    }
    if let Some(images) = request.images {
        product.images = images;
    }
    if let Some(featured) = request.featured {
        product.featured = featured;
    }

    let product = ctx.shop.create_product(product).map_err(reject)?;
    info!(admin = %user.id, product = %product.id, "product created");
    Ok(warp::reply::with_status(
        warp::reply::json(&product),
        StatusCode::CREATED,
    ))
}

async fn update_product(
    id: String,
    user: User,
    request: UpdateProductRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let category = match request.category.as_deref() {
        Some(name) => Some(parse_category(name)?),
        None => None,
    };
    let update = ProductUpdate {
        name: request.name,
        description: request.description,
        price: request
            .price
            .map(|p| Money::from_decimal(p, Currency::USD)),
        category,
        stock: request.stock,
        images: request.images,
        featured: request.featured,
        is_active: request.is_active,
    };

    let product = ctx
        .shop
        .update_product(&ProductId::new(id), update)
        .map_err(reject)?;
    info!(admin = %user.id, product = %product.id, "product updated");
    Ok(warp::reply::json(&product))
}

async fn delete_product(
    id: String,
    user: User,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let id = ProductId::new(id);
    ctx.shop.delete_product(&id).map_err(reject)?;
    info!(admin = %user.id, product = %id, "product removed");
    Ok(warp::reply::json(&serde_json::json!({
        "message": "Product removed"
    })))
}

fn reject(err: smartcart_commerce::CommerceError) -> Rejection {
    ApiError::from(err).reject()
}
