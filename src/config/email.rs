//! Email configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Mail relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Relay endpoint URL
    pub relay_url: String,

    /// Relay API key
    pub relay_api_key: SecretString,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Formatted "From" header value.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.relay_url.is_empty() {
            return Err(ValidationError::MissingRequired("RELAY_URL"));
        }
        if self.relay_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("RELAY_API_KEY"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

fn default_from_email() -> String {
    "noreply@coursekit.dev".to_string()
}

fn default_from_name() -> String {
    "CourseKit".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            relay_url: "https://mail.example.com/send".to_string(),
            relay_api_key: SecretString::new("key".to_string()),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }

    #[test]
    fn from_header_combines_name_and_address() {
        let mut cfg = config();
        cfg.from_email = "support@example.com".to_string();
        cfg.from_name = "Support Team".to_string();
        assert_eq!(cfg.from_header(), "Support Team <support@example.com>");
    }

    #[test]
    fn valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn broken_from_address_rejected() {
        let mut cfg = config();
        cfg.from_email = "not-an-address".to_string();
        assert!(matches!(cfg.validate(), Err(ValidationError::InvalidFromEmail)));
    }
}
