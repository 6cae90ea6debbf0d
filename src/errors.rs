use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Failures of the model gateway. None of these ever reach an HTTP client:
/// the study service answers every one of them with fallback content.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an empty response: {detail}")]
    EmptyResponse {
        provider: &'static str,
        detail: &'static str,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Model gateway disabled: {0}")]
    Disabled(String),
}

/// Error body returned to HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Errors the HTTP layer can report. Generation itself never fails, so these
/// only cover malformed uploads.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Error context for structured logging
#[derive(Debug)]
pub struct ErrorContext {
    pub operation: String,
    pub resource_type: String,
    pub user_friendly_message: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str, resource_type: &str) -> Self {
        Self {
            operation: operation.to_string(),
            resource_type: resource_type.to_string(),
            user_friendly_message: None,
        }
    }

    pub fn with_user_message(mut self, message: &str) -> Self {
        self.user_friendly_message = Some(message.to_string());
        self
    }
}

impl ApiError {
    /// Convert API error to HTTP response with consistent structure and logging
    pub fn to_response_with_context(
        self,
        context: ErrorContext,
    ) -> (StatusCode, Json<ErrorResponse>) {
        let status = match &self {
            ApiError::BadRequest(_) => {
                warn!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    error = %self,
                    "Bad request"
                );
                StatusCode::BAD_REQUEST
            }
            ApiError::ValidationError(_) => {
                info!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    error = %self,
                    "Validation error"
                );
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };

        let detail = context.user_friendly_message.unwrap_or_else(|| match self {
            ApiError::BadRequest(message) | ApiError::ValidationError(message) => message,
        });

        (status, Json(ErrorResponse { detail }))
    }
}

/// Helper macro for structured error responses
#[macro_export]
macro_rules! api_error {
    (bad_request, $operation:expr, $resource_type:expr, $message:expr) => {
        $crate::errors::ApiError::BadRequest($message.to_string())
            .to_response_with_context($crate::errors::ErrorContext::new($operation, $resource_type))
    };

    (validation, $operation:expr, $resource_type:expr, $message:expr) => {
        $crate::errors::ApiError::ValidationError($message.to_string())
            .to_response_with_context($crate::errors::ErrorContext::new($operation, $resource_type))
    };
}
