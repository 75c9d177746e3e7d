//! Error types shared across the domain layer.

use std::fmt;
use thiserror::Error;

/// Error codes organized by category.
///
/// The HTTP boundary maps these to status codes and stable string codes in
/// the JSON error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    ValidationFailed,

    // Authentication / authorization
    MalformedCredential,
    InvalidCredential,
    Forbidden,

    // Lookup failures
    NotFoundOrUnauthorized,
    NotFound,

    // Billing
    InvalidSignature,
    OrderAlreadyFinalized,
    GatewayError,
    GatewayTimeout,

    // Infrastructure
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_ERROR",
            ErrorCode::MalformedCredential => "MALFORMED_CREDENTIAL",
            ErrorCode::InvalidCredential => "INVALID_CREDENTIAL",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFoundOrUnauthorized => "NOT_FOUND_OR_UNAUTHORIZED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::OrderAlreadyFinalized => "ORDER_ALREADY_FINALIZED",
            ErrorCode::GatewayError => "GATEWAY_ERROR",
            ErrorCode::GatewayTimeout => "GATEWAY_TIMEOUT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// General-purpose domain error with a code and human-readable message.
///
/// Used by repositories and handlers that do not need a richer enum of their
/// own. Specific flows (billing, auth) have dedicated error types that
/// convert into this at the boundary.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}
