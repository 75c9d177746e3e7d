//! Authentication configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration: the managed identity provider plus the
/// shared secret for self-issued tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Identity provider base URL
    pub provider_base_url: String,

    /// API key for identity provider REST calls
    pub provider_api_key: SecretString,

    /// HS256 secret for self-issued tokens
    pub token_secret: SecretString,

    /// Self-issued token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    /// Self-issued token lifetime as a Duration.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Validate authentication configuration.
    ///
    /// Production requires HTTPS for the provider URL; development allows
    /// localhost over HTTP.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.provider_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("PROVIDER_BASE_URL"));
        }
        if self.provider_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PROVIDER_API_KEY"));
        }
        if self.token_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("TOKEN_SECRET"));
        }

        if *environment == Environment::Production
            && !self.provider_base_url.starts_with("https://")
        {
            return Err(ValidationError::ProviderMustBeHttps);
        }

        Ok(())
    }
}

fn default_token_ttl() -> u64 {
    86_400 // one day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> AuthConfig {
        AuthConfig {
            provider_base_url: base_url.to_string(),
            provider_api_key: SecretString::new("key".to_string()),
            token_secret: SecretString::new("secret".to_string()),
            token_ttl_secs: default_token_ttl(),
        }
    }

    #[test]
    fn valid_config_passes_in_production() {
        assert!(config("https://identity.example.com")
            .validate(&Environment::Production)
            .is_ok());
    }

    #[test]
    fn production_requires_https() {
        let cfg = config("http://identity.example.com");
        assert!(cfg.validate(&Environment::Development).is_ok());
        assert!(matches!(
            cfg.validate(&Environment::Production),
            Err(ValidationError::ProviderMustBeHttps)
        ));
    }

    #[test]
    fn empty_token_secret_is_rejected() {
        let mut cfg = config("https://identity.example.com");
        cfg.token_secret = SecretString::new(String::new());
        assert!(cfg.validate(&Environment::Development).is_err());
    }

    #[test]
    fn default_ttl_is_one_day() {
        let cfg = config("https://identity.example.com");
        assert_eq!(cfg.token_ttl(), Duration::from_secs(86_400));
    }
}
