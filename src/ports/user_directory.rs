//! User directory port - the managed identity provider.
//!
//! Owns credentials, email verification, and password reset. Profile data we
//! persist ourselves lives behind `ProfileStore`; this port is only the
//! provider-side surface.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{AuthError, CallerIdentity, UserId};

/// A user record as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub uid: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

/// Fields for creating a provider user.
#[derive(Debug, Clone)]
pub struct NewDirectoryUser {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Errors from identity provider calls.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Email/password pair rejected by the provider.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The provider throttled the caller.
    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    /// The provider rejected the request (duplicate email, weak password...).
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Managed identity provider operations.
///
/// # Contract
///
/// - `lookup_by_email` returns `Ok(None)` for an unknown email; "not found"
///   is an expected case, not an error branch.
/// - `verify_token` rejects with `AuthError::InvalidCredential` for tokens
///   the provider did not issue; the caller may then try other strategies.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Validate a provider-issued token and return the caller it identifies.
    async fn verify_token(&self, token: &str) -> Result<CallerIdentity, AuthError>;

    /// Sign a user in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<DirectoryUser, DirectoryError>;

    /// Look a user up by email. `None` means no such user.
    async fn lookup_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, DirectoryError>;

    /// Create a new provider user.
    async fn create_user(&self, new_user: NewDirectoryUser) -> Result<DirectoryUser, DirectoryError>;

    /// Fetch a user by uid.
    async fn get_user(&self, uid: &UserId) -> Result<Option<DirectoryUser>, DirectoryError>;

    /// Update display name and/or photo URL on the provider record.
    async fn update_user(
        &self,
        uid: &UserId,
        display_name: Option<String>,
        photo_url: Option<String>,
    ) -> Result<DirectoryUser, DirectoryError>;

    /// Delete a provider user.
    async fn delete_user(&self, uid: &UserId) -> Result<(), DirectoryError>;

    /// Generate an email-verification link for a new account.
    async fn email_verification_link(&self, email: &str) -> Result<String, DirectoryError>;

    /// Generate a password-reset link.
    async fn password_reset_link(&self, email: &str) -> Result<String, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn UserDirectory) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn UserDirectory>>();
    }

    #[test]
    fn directory_errors_render_messages() {
        assert_eq!(
            DirectoryError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            DirectoryError::rejected("Email already exists").to_string(),
            "Email already exists"
        );
    }
}
