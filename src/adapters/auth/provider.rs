//! Verifier for identity-provider-issued tokens.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, CallerIdentity};
use crate::ports::{TokenVerifier, UserDirectory};

/// Delegates token verification to the identity provider via the
/// `UserDirectory` port. Thin by design; translation of provider responses
/// already happens inside the directory adapter.
pub struct ProviderTokenVerifier {
    directory: Arc<dyn UserDirectory>,
}

impl ProviderTokenVerifier {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl TokenVerifier for ProviderTokenVerifier {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        self.directory.verify_token(token).await
    }
}
