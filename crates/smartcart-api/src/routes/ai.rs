//! Text-generation routes. Copywriting endpoints (describe,
//! seo-content) are admin-only; chat and recommendations are open to
//! any authenticated customer.

use crate::auth::{self, User};
use crate::error::ApiError;
use crate::routes::with_ctx;
use crate::server::AppContext;
use serde::Deserialize;
use smartcart_ai::ChatMessage;
use warp::{Filter, Rejection, Reply};

#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub features: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    #[serde(default)]
    pub preferences: String,
    #[serde(default)]
    pub purchase_history: String,
}

#[derive(Debug, Deserialize)]
pub struct SeoContentRequest {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: String,
}

pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let describe = warp::path!("api" / "ai" / "describe")
        .and(warp::post())
        .and(auth::admin(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(describe);

    let chat = warp::path!("api" / "ai" / "chat")
        .and(warp::post())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(chat);

    let recommendations = warp::path!("api" / "ai" / "recommendations")
        .and(warp::post())
        .and(auth::authenticated(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(recommendations);

    let seo = warp::path!("api" / "ai" / "seo-content")
        .and(warp::post())
        .and(auth::admin(ctx.sessions.clone()))
        .and(warp::body::json())
        .and(with_ctx(ctx))
        .and_then(seo_content);

    describe.or(chat).or(recommendations).or(seo)
}

async fn describe(
    _admin: User,
    request: DescribeRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let description = ctx
        .ai
        .describe_product(&request.title, &request.category, &request.features)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&serde_json::json!({
        "description": description
    })))
}

async fn chat(
    _user: User,
    request: ChatRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let response = ctx
        .ai
        .chat(&request.message, &request.conversation_history)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&serde_json::json!({
        "response": response
    })))
}

async fn recommendations(
    _user: User,
    request: RecommendationsRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let recommendations = ctx
        .ai
        .recommendations(&request.preferences, &request.purchase_history)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&serde_json::json!({
        "recommendations": recommendations
    })))
}

async fn seo_content(
    _admin: User,
    request: SeoContentRequest,
    ctx: AppContext,
) -> Result<impl Reply, Rejection> {
    let content = ctx
        .ai
        .seo_content(&request.product_name, &request.category, &request.keywords)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&serde_json::json!({
        "content": content
    })))
}

fn reject(err: smartcart_ai::AiError) -> Rejection {
    ApiError::from(err).reject()
}
