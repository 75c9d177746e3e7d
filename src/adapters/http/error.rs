//! HTTP error responses.
//!
//! Every error leaving the API has the same JSON shape:
//!
//! ```json
//! { "error": "human-readable message", "code": "STABLE_CODE", "details": "..." }
//! ```
//!
//! `details` is omitted when absent. Internal messages (database failures,
//! provider internals) are replaced with a generic message so storage and
//! upstream details never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::account::AccountError;
use crate::domain::billing::BillingError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};

/// An error ready to be rendered as an HTTP response.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Map an error code to its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidSignature
        | ErrorCode::GatewayError => StatusCode::BAD_REQUEST,
        ErrorCode::MalformedCredential | ErrorCode::InvalidCredential => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFoundOrUnauthorized | ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::OrderAlreadyFinalized => StatusCode::CONFLICT,
        ErrorCode::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }

    /// True when the outward message must be replaced with a generic one.
    fn hides_message(&self) -> bool {
        matches!(self.code, ErrorCode::DatabaseError | ErrorCode::InternalError)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let hides_message = self.hides_message();
        if hides_message {
            tracing::error!(code = %self.code, message = %self.message, "internal error");
        }
        let body = ErrorBody {
            error: if hides_message {
                "Internal server error".to_string()
            } else {
                self.message
            },
            code: self.code.to_string(),
            details: if hides_message {
                None
            } else {
                self.details
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code,
            message: err.message,
            details: err.details,
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MalformedCredential => {
                Self::new(ErrorCode::MalformedCredential, "Malformed credential")
            }
            AuthError::InvalidCredential => {
                Self::new(ErrorCode::InvalidCredential, "Invalid credential")
            }
            AuthError::ServiceUnavailable(msg) => Self::new(ErrorCode::InternalError, msg),
        }
    }
}
