//! Payment configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Payment gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Public gateway key id, returned to the frontend at order creation
    pub gateway_key_id: String,

    /// Gateway key secret: authenticates API calls and keys the HMAC on
    /// completion callbacks
    pub gateway_key_secret: SecretString,

    /// Gateway API base URL
    #[serde(default = "default_gateway_base_url")]
    pub gateway_base_url: String,

    /// Deadline for gateway order creation in seconds
    #[serde(default = "default_gateway_timeout")]
    pub gateway_timeout_secs: u64,

    /// Order currency code
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// Gateway call deadline as a Duration.
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gateway_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_KEY_ID"));
        }
        if self.gateway_key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_KEY_SECRET"));
        }
        if self.gateway_timeout_secs == 0 || self.gateway_timeout_secs > 60 {
            return Err(ValidationError::InvalidGatewayTimeout);
        }
        Ok(())
    }
}

fn default_gateway_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_gateway_timeout() -> u64 {
    10
}

fn default_currency() -> String {
    "INR".to_string()
}
