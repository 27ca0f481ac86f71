//! Cart routes. Every operation requires an authenticated session and
//! operates on the caller's own cart.

use crate::auth::{self, User};
use crate::error::ApiError;
use crate::routes::with_ctx;
use crate::server::AppContext;
use serde::Deserialize;
use smartcart_commerce::{CartItemId, ProductId};
use warp::{Filter, Rejection, Reply};

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}

pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let get = warp::path!("api" / "cart")
        .and(warp::get())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(with_ctx(ctx.clone()))
        .and_then(get_cart);

    let add = warp::path!("api" / "cart")
        .and(warp::post())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(add_to_cart);

    let update = warp::path!("api" / "cart" / String)
        .and(warp::put())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(update_item);

    let remove = warp::path!("api" / "cart" / String)
        .and(warp::delete())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(with_ctx(ctx.clone()))
        .and_then(remove_item);

    let clear = warp::path!("api" / "cart")
        .and(warp::delete())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(with_ctx(ctx))
        .and_then(clear_cart);

    get.or(add).or(update).or(remove).or(clear)
}

async fn get_cart(user: User, ctx: AppContext) -> Result<impl Reply, Rejection> {
    let view = ctx.shop.get_cart(&user.id).map_err(reject)?;
    Ok(warp::reply::json(&view))
}

async fn add_to_cart(
    user: User,
    request: AddToCartRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let view = ctx
        .shop
        .add_to_cart(
            &user.id,
            &ProductId::new(request.product_id),
            request.quantity,
        )
        .map_err(reject)?;
    Ok(warp::reply::json(&view))
}

async fn update_item(
    item_id: String,
    user: User,
    request: UpdateCartItemRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let view = ctx
        .shop
        .update_cart_item(&user.id, &CartItemId::new(item_id), request.quantity)
        .map_err(reject)?;
    Ok(warp::reply::json(&view))
}

async fn remove_item(
    item_id: String,
    user: User,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let view = ctx
        .shop
        .remove_from_cart(&user.id, &CartItemId::new(item_id))
        .map_err(reject)?;
    Ok(warp::reply::json(&view))
}

async fn clear_cart(user: User, ctx: AppContext) -> Result<impl Reply, Rejection> {
    let view = ctx.shop.clear_cart(&user.id).map_err(reject)?;
    Ok(warp::reply::json(&view))
}

fn reject(err: smartcart_commerce::CommerceError) -> Rejection {
    ApiError::from(err).reject()
}
