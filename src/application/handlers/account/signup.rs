//! SignupHandler - creates the provider account and the local profile.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::account::{validate_email, AccountError, UserProfile};
use crate::ports::{Mailer, NewDirectoryUser, ProfileStore, TokenIssuer, UserDirectory};

use super::emails::welcome_email;
use super::map_directory_err;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SignupResult {
    pub profile: UserProfile,
    pub token: String,
}

/// Creates a user in the identity provider, persists the local profile, and
/// sends the verification email.
///
/// The welcome mail is fire-and-forget: the signup succeeds even when the
/// mail relay is down, and a delivery failure is only logged.
pub struct SignupHandler {
    directory: Arc<dyn UserDirectory>,
    profiles: Arc<dyn ProfileStore>,
    mailer: Arc<dyn Mailer>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SignupHandler {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        profiles: Arc<dyn ProfileStore>,
        mailer: Arc<dyn Mailer>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            directory,
            profiles,
            mailer,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, AccountError> {
        validate_email(&cmd.email)?;
        if cmd.password.len() < MIN_PASSWORD_LEN {
            return Err(AccountError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        // Checking first gives a clean message; the provider still enforces
        // uniqueness if a concurrent signup slips through.
        if self
            .directory
            .lookup_by_email(&cmd.email)
            .await
            .map_err(map_directory_err)?
            .is_some()
        {
            return Err(AccountError::validation("Email already registered"));
        }

        let user = self
            .directory
            .create_user(NewDirectoryUser {
                email: cmd.email.clone(),
                password: cmd.password,
                display_name: cmd.display_name.clone(),
            })
            .await
            .map_err(map_directory_err)?;

        let profile = UserProfile::new(
            user.uid.clone(),
            user.email.clone(),
            cmd.display_name.clone(),
            Utc::now(),
        );
        self.profiles.insert(&profile).await?;

        let token = self
            .tokens
            .issue(&user.uid)
            .map_err(|e| AccountError::provider(e.to_string()))?;

        self.send_welcome(&user.email, cmd.display_name.as_deref())
            .await;

        tracing::info!(user_id = %user.uid, "user signed up");
        Ok(SignupResult { profile, token })
    }

    async fn send_welcome(&self, email: &str, display_name: Option<&str>) {
        let link = match self.directory.email_verification_link(email).await {
            Ok(link) => link,
            Err(err) => {
                tracing::warn!(error = %err, "could not generate verification link");
                return;
            }
        };
        let message = welcome_email(email, display_name, &link);
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            if let Err(err) = mailer.send(message).await {
                tracing::warn!(error = %err, "welcome email delivery failed");
            }
        });
    }
}
