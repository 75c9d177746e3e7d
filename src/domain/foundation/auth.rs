//! Caller identity and authentication errors.
//!
//! A `CallerIdentity` is what a verified bearer credential yields. It carries
//! only the subject; profile data lives behind the `UserDirectory` port and is
//! fetched on demand. Any verification strategy (provider-issued or
//! self-issued) populates the same type.

use super::UserId;
use thiserror::Error;

/// Identity of a verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Subject identifier, the provider uid.
    pub subject: UserId,
}

impl CallerIdentity {
    pub fn new(subject: UserId) -> Self {
        Self { subject }
    }
}

/// Errors produced while verifying a bearer credential.
///
/// Domain-centric: these describe what went wrong from the application's
/// perspective, not the identity provider's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The Authorization header is missing or not `Bearer <nonempty token>`.
    #[error("Malformed credential")]
    MalformedCredential,

    /// No verification strategy accepted the token.
    #[error("Invalid credential")]
    InvalidCredential,

    /// The identity provider could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// True for transient errors that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
