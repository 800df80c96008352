//! HTTP error mapping.
//!
//! Every failure leaves the proxy as JSON `{ "error": string, "details"?: any }`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use strategy_core::StrategyError;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body. Ensure 'prompt' is provided.";
pub const MISSING_KEY_MESSAGE: &str = "Server configuration error: API key missing.";

/// Error returned from proxy handlers
#[derive(Debug)]
pub enum ApiError {
    /// Missing or unreadable prompt
    BadRequest(String),
    /// Prompt present but rejected (blank, too long)
    InvalidPrompt(String),
    /// Anything other than POST/OPTIONS on the proxy route
    MethodNotAllowed,
    /// Server is missing its API key
    MissingApiKey,
    /// Upstream answered with an error status
    Upstream {
        status: StatusCode,
        error: String,
        details: Value,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidPrompt(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingApiKey | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let allow = matches!(self, Self::MethodNotAllowed);

        let body = match self {
            Self::BadRequest(error) | Self::Internal(error) => ErrorBody { error, details: None },
            Self::InvalidPrompt(reason) => ErrorBody {
                error: "Invalid prompt".into(),
                details: Some(Value::String(reason)),
            },
            Self::MethodNotAllowed => ErrorBody {
                error: "Method Not Allowed".into(),
                details: None,
            },
            Self::MissingApiKey => ErrorBody {
                error: MISSING_KEY_MESSAGE.into(),
                details: None,
            },
            Self::Upstream { error, details, .. } => ErrorBody {
                error,
                details: (!details.is_null()).then_some(details),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if allow {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST, OPTIONS"));
        }
        response
    }
}

impl From<StrategyError> for ApiError {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::Config(_) => Self::MissingApiKey,
            StrategyError::InvalidPrompt(reason) => Self::InvalidPrompt(reason),
            StrategyError::Upstream {
                status,
                message,
                details,
            } => Self::Upstream {
                status: StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                error: message,
                details,
            },
            other => Self::Internal(other.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_relayed() {
        let err = ApiError::from(StrategyError::Upstream {
            status: 429,
            message: "Upstream API request failed: slow down".into(),
            details: Value::Null,
        });
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_non_error_upstream_status_falls_back_to_500() {
        let err = ApiError::from(StrategyError::Upstream {
            status: 302,
            message: "Upstream API request failed: Found".into(),
            details: Value::Null,
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST, OPTIONS");
    }

    #[test]
    fn test_config_error_maps_to_missing_key() {
        let err = ApiError::from(StrategyError::Config("TOGETHER_API_KEY not set".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::MissingApiKey));
    }
}
