//! HTTP mail relay adapter.
//!
//! Implements `Mailer` against a JSON send endpoint authenticated with a
//! bearer key. Senders treat delivery as fire-and-forget, so this adapter
//! only distinguishes "the relay said no" from "the relay was unreachable".

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::ports::{EmailMessage, Mailer, MailerError};

/// Mail relay connection settings.
#[derive(Clone)]
pub struct RelayConfig {
    pub url: String,
    pub api_key: SecretString,
    /// Formatted From header, e.g. `CourseKit <noreply@coursekit.dev>`.
    pub from: String,
}

/// `Mailer` backed by an HTTP relay.
pub struct RelayMailer {
    config: RelayConfig,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SendBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl RelayMailer {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&SendBody {
                from: &self.config.from,
                to: &message.to,
                subject: &message.subject,
                html: &message.html_body,
            })
            .send()
            .await
            .map_err(|e| MailerError::Unreachable(e.to_string()))?;

        if response.status().is_success() {
            tracing::debug!(to = %message.to, subject = %message.subject, "email accepted by relay");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(MailerError::Rejected(format!("HTTP {status}: {body}")))
        }
    }
}
