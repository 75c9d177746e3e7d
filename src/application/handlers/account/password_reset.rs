//! PasswordResetHandler - emails a provider-generated reset link.

use std::sync::Arc;

use crate::domain::account::{validate_email, AccountError};
use crate::ports::{DirectoryError, Mailer, UserDirectory};

use super::emails::password_reset_email;
use super::map_directory_err;

#[derive(Debug, Clone)]
pub struct PasswordResetCommand {
    pub email: String,
}

/// Requests a reset link from the provider and mails it. The response is
/// the same whether or not the email exists, so the endpoint cannot be used
/// to enumerate accounts.
pub struct PasswordResetHandler {
    directory: Arc<dyn UserDirectory>,
    mailer: Arc<dyn Mailer>,
}

impl PasswordResetHandler {
    pub fn new(directory: Arc<dyn UserDirectory>, mailer: Arc<dyn Mailer>) -> Self {
        Self { directory, mailer }
    }

    pub async fn handle(&self, cmd: PasswordResetCommand) -> Result<(), AccountError> {
        validate_email(&cmd.email)?;

        let link = match self.directory.password_reset_link(&cmd.email).await {
            Ok(link) => link,
            // Unknown email gets the same success response as a known one.
            Err(DirectoryError::Rejected(_)) | Err(DirectoryError::InvalidCredentials) => {
                tracing::debug!("password reset requested for unknown email");
                return Ok(());
            }
            Err(err) => return Err(map_directory_err(err)),
        };

        let message = password_reset_email(&cmd.email, &link);
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            if let Err(err) = mailer.send(message).await {
                tracing::warn!(error = %err, "password reset email delivery failed");
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::foundation::{AuthError, CallerIdentity, UserId};
    use crate::ports::{DirectoryUser, EmailMessage, MailerError, NewDirectoryUser};

    struct LinkDirectory {
        known: &'static str,
    }

    #[async_trait]
    impl UserDirectory for LinkDirectory {
        async fn verify_token(&self, _token: &str) -> Result<CallerIdentity, AuthError> {
            Err(AuthError::InvalidCredential)
        }

        async fn sign_in(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<DirectoryUser, DirectoryError> {
            Err(DirectoryError::InvalidCredentials)
        }

        async fn lookup_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<DirectoryUser>, DirectoryError> {
            Ok(None)
        }

        async fn create_user(
            &self,
            _new_user: NewDirectoryUser,
        ) -> Result<DirectoryUser, DirectoryError> {
            Err(DirectoryError::rejected("not supported"))
        }

        async fn get_user(&self, _uid: &UserId) -> Result<Option<DirectoryUser>, DirectoryError> {
            Ok(None)
        }

        async fn update_user(
            &self,
            _uid: &UserId,
            _display_name: Option<String>,
            _photo_url: Option<String>,
        ) -> Result<DirectoryUser, DirectoryError> {
            Err(DirectoryError::rejected("not supported"))
        }

        async fn delete_user(&self, _uid: &UserId) -> Result<(), DirectoryError> {
            Ok(())
        }

        async fn email_verification_link(&self, _email: &str) -> Result<String, DirectoryError> {
            Ok(String::new())
        }

        async fn password_reset_link(&self, email: &str) -> Result<String, DirectoryError> {
            if email == self.known {
                Ok(format!("https://id.example.com/reset?email={email}"))
            } else {
                Err(DirectoryError::rejected("No such user"))
            }
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<EmailMessage>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    fn handler() -> (PasswordResetHandler, Arc<RecordingMailer>) {
        let mailer = Arc::new(RecordingMailer::default());
        let handler = PasswordResetHandler::new(
            Arc::new(LinkDirectory {
                known: "alice@example.com",
            }),
            mailer.clone(),
        );
        (handler, mailer)
    }

    #[tokio::test]
    async fn known_email_gets_reset_mail() {
        let (handler, mailer) = handler();
        handler
            .handle(PasswordResetCommand {
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();

        for _ in 0..20 {
            if !mailer.sent.lock().unwrap().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html_body.contains("id.example.com/reset"));
    }

    #[tokio::test]
    async fn unknown_email_succeeds_without_mail() {
        let (handler, mailer) = handler();
        handler
            .handle(PasswordResetCommand {
                email: "nobody@example.com".to_string(),
            })
            .await
            .unwrap();

        tokio::task::yield_now().await;
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let (handler, _mailer) = handler();
        let err = handler
            .handle(PasswordResetCommand {
                email: "nope".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
    }
}
