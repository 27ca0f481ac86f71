//! API error taxonomy and rejection handling.

use serde::Serialize;
use smartcart_ai::AiError;
use smartcart_commerce::CommerceError;
use std::convert::Infallible;
use thiserror::Error;
use tracing::error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// An error ready to leave the API boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Internal detail is logged, never surfaced.
    #[error("Server error")]
    Internal(String),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Wrap into a warp rejection.
    pub fn reject(self) -> Rejection {
        warp::reject::custom(self)
    }
}

impl From<CommerceError> for ApiError {
    fn from(err: CommerceError) -> Self {
        match err {
            CommerceError::ProductNotFound(_)
            | CommerceError::CartNotFound(_)
            | CommerceError::OrderNotFound(_)
            | CommerceError::ItemNotInCart(_) => ApiError::NotFound(err.to_string()),
            CommerceError::NotAuthorized => ApiError::Forbidden(err.to_string()),
            CommerceError::Storage(detail) => ApiError::Internal(detail),
            CommerceError::Overflow => ApiError::Internal(err.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::MissingField(message) => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Map every rejection to the `{ "message": ... }` wire shape.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(api) = err.find::<ApiError>() {
        if let ApiError::Internal(detail) = api {
            error!(detail = %detail, "request failed");
        }
        (api.status(), api.message())
    } else if let Some(body) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!(?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    };

    let body = warp::reply::json(&ErrorBody { message });
    Ok(warp::reply::with_status(body, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commerce_error_status_mapping() {
        let cases = [
            (
                CommerceError::ProductNotFound("p".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (CommerceError::EmptyCart, StatusCode::BAD_REQUEST),
            (
                CommerceError::InsufficientStock {
                    product: "Widget".to_string(),
                    requested: 5,
                    available: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (CommerceError::NotAuthorized, StatusCode::FORBIDDEN),
            (
                CommerceError::Storage("lock".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_internal_detail_not_surfaced() {
        let api = ApiError::from(CommerceError::Storage("poisoned lock at 0x1".to_string()));
        assert_eq!(api.message(), "Server error");
    }

    #[test]
    fn test_insufficient_stock_message_reports_available() {
        let api = ApiError::from(CommerceError::InsufficientStock {
            product: "Widget".to_string(),
            requested: 5,
            available: 2,
        });
        assert!(api.message().contains("Only 2 items available"));
    }
}
