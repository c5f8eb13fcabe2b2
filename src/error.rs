use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Message used when an error carries no usable text
const FALLBACK_MESSAGE: &str = "Weather service error";

/// Message returned for failures nothing upstream of the router classified
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Standard error response format for all API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "City not found: Atlantis")]
    pub error: String,
}

impl ErrorResponse {
    /// Build an error body, replacing a blank message with a generic one
    pub fn new(error: impl Into<String>) -> Self {
        let error = error.into();
        if error.trim().is_empty() {
            Self {
                error: FALLBACK_MESSAGE.to_string(),
            }
        } else {
            Self { error }
        }
    }
}

/// Trait for errors that can be converted to HTTP responses
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;
}

/// Render the full `source()` chain of an error for logging
pub fn source_chain(err: &dyn std::error::Error) -> String {
    let mut chain = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        chain.push(cause.to_string());
        current = cause.source();
    }
    chain.join(": ")
}

/// Convert any HttpError into an Axum response
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let message = err.to_string();
    let cause = source_chain(&err);

    if status.is_server_error() {
        tracing::error!(
            error = %message,
            cause = %cause,
            status = %status,
            "API error"
        );
    } else {
        tracing::warn!(error = %message, status = %status, "Request rejected");
    }

    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Response for failures that reached the router without a classification
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

/// Handle errors raised by the middleware stack (request timeout and friends)
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(ErrorResponse::new("Request timed out")),
        )
            .into_response()
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        internal_error_response()
    }
}

/// Turn a handler panic into the generic 500 body
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    internal_error_response()
}

/// Macro to implement IntoResponse for HttpError types
#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use thiserror::Error;

    #[derive(Error, Debug)]
    enum TestError {
        #[error("{0}")]
        BadRequest(String),

        #[error("outer failure")]
        Wrapped(#[source] std::io::Error),
    }

    impl HttpError for TestError {
        fn status_code(&self) -> StatusCode {
            match self {
                Self::BadRequest(_) => StatusCode::BAD_REQUEST,
                Self::Wrapped(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_into_response_uses_status_and_message() {
        let response = into_response(TestError::BadRequest("bad input".to_string()));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "bad input" }));
    }

    #[tokio::test]
    async fn test_blank_message_replaced_with_fallback() {
        let response = into_response(TestError::BadRequest("   ".to_string()));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Weather service error");
    }

    #[tokio::test]
    async fn test_source_is_not_leaked_into_body() {
        let err = TestError::Wrapped(std::io::Error::other("connection reset"));
        let response = into_response(err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "outer failure");
    }

    #[test]
    fn test_source_chain() {
        let err = TestError::Wrapped(std::io::Error::other("connection reset"));
        assert_eq!(source_chain(&err), "connection reset");

        let err = TestError::BadRequest("x".to_string());
        assert_eq!(source_chain(&err), "");
    }

    #[tokio::test]
    async fn test_handle_panic_returns_generic_500() {
        let response = handle_panic(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_handle_middleware_error_timeout() {
        let err: BoxError = Box::new(tower::timeout::error::Elapsed::new());
        let response = handle_middleware_error(err).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Request timed out");
    }

    #[tokio::test]
    async fn test_handle_middleware_error_other() {
        let err: BoxError = "something else".into();
        let response = handle_middleware_error(err).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
