//! Order routes: checkout, listings, and admin fulfillment.

use crate::auth::{self, User};
use crate::error::ApiError;
use crate::routes::with_ctx;
use crate::server::AppContext;
use serde::Deserialize;
use smartcart_commerce::order::{OrderStatus, PaymentMethod, ShippingAddress};
use smartcart_commerce::OrderId;
use tracing::info;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let place = warp::path!("api" / "orders")
        .and(warp::post())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(place_order);

    let mine = warp::path!("api" / "orders")
        .and(warp::get())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(with_ctx(ctx.clone()))
        .and_then(list_my_orders);

    let all = warp::path!("api" / "orders" / "admin" / "all")
        .and(warp::get())
        .and(auth::admin(ctx.sessions.clone()))
        .and(warp::query::<PageQuery>())
        .and(with_ctx(ctx.clone()))
        .and_then(list_all_orders);

    let stats = warp::path!("api" / "orders" / "admin" / "stats")
        .and(warp::get())
        .and(auth::admin(ctx.sessions.clone()))
        .and(with_ctx(ctx.clone()))
        .and_then(order_stats);

    let detail = warp::path!("api" / "orders" / String)
        .and(warp::get())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(with_ctx(ctx.clone()))
        .and_then(get_order);

    let status = warp::path!("api" / "orders" / String / "status")
        .and(warp::put())
        .and(auth::admin(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx))
        .and_then(update_status);

    // `admin/...` must match before the `:id` routes.
    place.or(all).or(stats).or(mine).or(status).or(detail)
}

async fn place_order(
    user: User,
    request: PlaceOrderRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let order = ctx
        .shop
        .place_order(&user.id, request.shipping_address, request.payment_method)
        .map_err(reject)?;
    Ok(warp::reply::with_status(
        warp::reply::json(&order),
        StatusCode::CREATED,
    ))
}

async fn list_my_orders(user: User, ctx: AppContext) -> Result<impl Reply, Rejection> {
    let orders = ctx.shop.list_user_orders(&user.id).map_err(reject)?;
    Ok(warp::reply::json(&orders))
}

async fn list_all_orders(
    _admin: User,
    query: PageQuery,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let page = ctx
        .shop
        .list_all_orders(query.page.unwrap_or(0), query.limit.unwrap_or(0))
        .map_err(reject)?;
    Ok(warp::reply::json(&page))
}

async fn order_stats(_admin: User, ctx: AppContext) -> Result<impl Reply, Rejection> {
    let stats = ctx.shop.order_stats().map_err(reject)?;
    Ok(warp::reply::json(&stats))
}

async fn get_order(id: String, user: User, ctx: AppContext) -> Result<impl Reply, Rejection> {
    let order = ctx
        .shop
        .get_order(&OrderId::new(id), &user.id, user.is_admin())
        .map_err(reject)?;
    Ok(warp::reply::json(&order))
}

async fn update_status(
    id: String,
    admin: User,
    request: UpdateStatusRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let status = OrderStatus::from_str(&request.status).ok_or_else(|| {
        ApiError::BadRequest(format!("Invalid order status: {}", request.status)).reject()
    })?;
    let order = ctx
        .shop
        .update_order_status(&OrderId::new(id), status, request.tracking_number)
        .map_err(reject)?;
    info!(admin = %admin.id, order = %order.id, status = %order.status.as_str(), "order status updated");
    Ok(warp::reply::json(&order))
}

fn reject(err: smartcart_commerce::CommerceError) -> Rejection {
    ApiError::from(err).reject()
}
