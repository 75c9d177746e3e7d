//! Transactional mail port.

use async_trait::async_trait;
use thiserror::Error;

/// A templated transactional email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail delivery errors. Senders treat delivery as fire-and-forget and only
/// log these; a failed mail never fails the request that triggered it.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Mail relay rejected the message: {0}")]
    Rejected(String),

    #[error("Mail relay unreachable: {0}")]
    Unreachable(String),
}

/// Outbound transactional mail.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError>;
}
