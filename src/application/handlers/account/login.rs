//! LoginHandler - email/password sign-in via the identity provider.

use std::sync::Arc;

use crate::domain::account::{AccountError, UserProfile};
use crate::ports::{ProfileStore, TokenIssuer, UserDirectory};

use super::map_directory_err;

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub profile: Option<UserProfile>,
}

/// Verifies the credential pair with the provider, then mints a self-issued
/// token so subsequent requests do not round-trip to the provider.
pub struct LoginHandler {
    directory: Arc<dyn UserDirectory>,
    profiles: Arc<dyn ProfileStore>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        profiles: Arc<dyn ProfileStore>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            directory,
            profiles,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        if cmd.email.is_empty() || cmd.password.is_empty() {
            return Err(AccountError::validation("Email and password are required"));
        }

        let user = self
            .directory
            .sign_in(&cmd.email, &cmd.password)
            .await
            .map_err(map_directory_err)?;

        let token = self
            .tokens
            .issue(&user.uid)
            .map_err(|e| AccountError::provider(e.to_string()))?;

        // A missing profile row is tolerated: provider accounts can predate
        // the local store.
        let profile = self.profiles.get(&user.uid).await?;
        if profile.is_none() {
            tracing::warn!(user_id = %user.uid, "login for user with no local profile");
        }

        tracing::info!(user_id = %user.uid, "user logged in");
        Ok(LoginResult { token, profile })
    }
}
