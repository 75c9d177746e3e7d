//! Billing flow errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from order creation and payment reconciliation.
#[derive(Debug, Clone, Error)]
pub enum BillingError {
    /// Missing or invalid request fields.
    #[error("{0}")]
    Validation(String),

    /// No order matches the external id for this caller. Deliberately does
    /// not distinguish "does not exist" from "belongs to someone else".
    #[error("Order not found or unauthorized access")]
    NotFoundOrUnauthorized,

    /// The supplied callback signature does not match the expected digest.
    #[error("Invalid payment signature")]
    InvalidSignature,

    /// A duplicate callback asked for a different terminal outcome than the
    /// one already recorded.
    #[error("Order is already finalized")]
    AlreadyFinalized,

    /// The payment gateway returned a non-success response.
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// The payment gateway did not answer within the configured deadline.
    /// Retryable by the client.
    #[error("Payment gateway timed out")]
    GatewayTimeout,

    /// Storage failure.
    #[error("Storage error: {0}")]
    Database(String),
}

impl BillingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Error code used by the HTTP boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::Validation(_) => ErrorCode::ValidationFailed,
            BillingError::NotFoundOrUnauthorized => ErrorCode::NotFoundOrUnauthorized,
            BillingError::InvalidSignature => ErrorCode::InvalidSignature,
            BillingError::AlreadyFinalized => ErrorCode::OrderAlreadyFinalized,
            BillingError::Gateway(_) => ErrorCode::GatewayError,
            BillingError::GatewayTimeout => ErrorCode::GatewayTimeout,
            BillingError::Database(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DatabaseError => BillingError::Database(err.message),
            _ => BillingError::Database(format!("{}: {}", err.code, err.message)),
        }
    }
}
