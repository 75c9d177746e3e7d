//! Configurable token verifier for tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, CallerIdentity, UserId};
use crate::ports::TokenVerifier;

/// Verifier that accepts a single fixed token, or fails transiently.
pub struct MockVerifier {
    mode: Mode,
}

enum Mode {
    Accept { token: String, subject: String },
    Unavailable,
}

impl MockVerifier {
    /// Accepts exactly `token`, mapping it to `subject`.
    pub fn accepting(token: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            mode: Mode::Accept {
                token: token.into(),
                subject: subject.into(),
            },
        }
    }

    /// Always fails with `ServiceUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            mode: Mode::Unavailable,
        }
    }
}

#[async_trait]
impl TokenVerifier for MockVerifier {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        match &self.mode {
            Mode::Accept {
                token: expected,
                subject,
            } if token == expected => Ok(CallerIdentity::new(
                UserId::new(subject.clone()).map_err(|_| AuthError::InvalidCredential)?,
            )),
            Mode::Accept { .. } => Err(AuthError::InvalidCredential),
            Mode::Unavailable => Err(AuthError::service_unavailable("mock outage")),
        }
    }
}
