//! Typed HTTP client for the SmartCart REST API.

use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use smartcart_ai::ChatMessage;
use smartcart_commerce::catalog::Product;
use smartcart_commerce::order::Order;
use smartcart_store::{CartView, OrderPage, OrderStats, ProductPage};
use tracing::debug;

/// API client bound to a base URL and optional bearer token.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Query parameters for the product listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DescriptionBody {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChatBody {
    response: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationsBody {
    recommendations: String,
}

#[derive(Debug, Deserialize)]
struct SeoContentBody {
    content: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach the bearer token used for authenticated endpoints.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response
            .json::<MessageBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_else(|_| status.to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    // ---- Products ----

    pub async fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> Result<ProductPage, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/products")
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/api/products/{id}"))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn featured_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/products/featured")
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/products/categories")
            .send()
            .await?;
        Self::decode(response).await
    }

    // ---- Cart ----

    pub async fn get_cart(&self) -> Result<CartView, ClientError> {
        let response = self.request(reqwest::Method::GET, "/api/cart").send().await?;
        Self::decode(response).await
    }

    pub async fn add_to_cart(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartView, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/cart")
            .json(&json!({ "product_id": product_id, "quantity": quantity }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update_cart_item(
        &self,
        item_id: &str,
        quantity: i64,
    ) -> Result<CartView, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/api/cart/{item_id}"))
            .json(&json!({ "quantity": quantity }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn remove_from_cart(&self, item_id: &str) -> Result<CartView, ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/api/cart/{item_id}"))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn clear_cart(&self) -> Result<CartView, ClientError> {
        let response = self.request(reqwest::Method::DELETE, "/api/cart").send().await?;
        Self::decode(response).await
    }

    // ---- Orders ----

    pub async fn place_order(
        &self,
        shipping_address: &smartcart_commerce::order::ShippingAddress,
        payment_method: smartcart_commerce::order::PaymentMethod,
    ) -> Result<Order, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/orders")
            .json(&json!({
                "shipping_address": shipping_address,
                "payment_method": payment_method,
            }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/api/orders").send().await?;
        Self::decode(response).await
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/api/orders/{id}"))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn all_orders(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<OrderPage, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/orders/admin/all")
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn order_stats(&self) -> Result<OrderStats, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/orders/admin/stats")
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update_order_status(
        &self,
        id: &str,
        status: &str,
        tracking_number: Option<&str>,
    ) -> Result<Order, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/api/orders/{id}/status"))
            .json(&json!({ "status": status, "tracking_number": tracking_number }))
            .send()
            .await?;
        Self::decode(response).await
    }

    // ---- AI ----

    pub async fn describe_product(
        &self,
        title: &str,
        category: &str,
        features: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/ai/describe")
            .json(&json!({ "title": title, "category": category, "features": features }))
            .send()
            .await?;
        Self::decode::<DescriptionBody>(response)
            .await
            .map(|b| b.description)
    }

    pub async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/ai/chat")
            .json(&json!({ "message": message, "conversation_history": history }))
            .send()
            .await?;
        Self::decode::<ChatBody>(response).await.map(|b| b.response)
    }

    pub async fn recommendations(
        &self,
        preferences: &str,
        purchase_history: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/ai/recommendations")
            .json(&json!({
                "preferences": preferences,
                "purchase_history": purchase_history,
            }))
            .send()
            .await?;
        Self::decode::<RecommendationsBody>(response)
            .await
            .map(|b| b.recommendations)
    }

    pub async fn seo_content(
        &self,
        product_name: &str,
        category: &str,
        keywords: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/ai/seo-content")
            .json(&json!({
                "product_name": product_name,
                "category": category,
                "keywords": keywords,
            }))
            .send()
            .await?;
        Self::decode::<SeoContentBody>(response)
            .await
            .map(|b| b.content)
    }
}
