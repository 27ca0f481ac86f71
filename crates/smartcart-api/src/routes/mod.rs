//! Route filters, one module per resource.

pub mod ai;
pub mod cart;
pub mod orders;
pub mod products;

use crate::server::AppContext;
use warp::Filter;

/// Inject the application context into a handler chain.
pub(crate) fn with_ctx(
    ctx: AppContext,
) -> impl Filter<Extract = (AppContext,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}
