//! Token verification port.
//!
//! One implementation per trust source: the identity provider's own tokens,
//! and locally signed self-issued tokens. The auth middleware holds an
//! ordered chain of verifiers and accepts the first success; both login
//! mechanisms stay valid simultaneously during a provider migration.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, CallerIdentity};

/// Verifies a single bearer token against one trust source.
///
/// # Contract
///
/// Implementations must:
/// - Return the caller identity when the token is valid for this source
/// - Return `AuthError::InvalidCredential` when it is not (including expiry)
/// - Return `AuthError::ServiceUnavailable` only for transient infrastructure
///   failures, never for a rejected token
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw token (without the `Bearer ` prefix).
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError>;
}

/// Mints self-issued tokens at login and signup.
///
/// Minting is local signing, so this trait is synchronous.
pub trait TokenIssuer: Send + Sync {
    /// Issue a signed token for the given subject.
    fn issue(&self, subject: &crate::domain::foundation::UserId) -> Result<String, AuthError>;
}
