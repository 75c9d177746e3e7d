//! Configuration error types.

use thiserror::Error;

/// Errors loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic validation of loaded configuration.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(&'static str),

    #[error("Server port cannot be 0")]
    InvalidPort,

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Database URL must start with postgresql:// or postgres://")]
    InvalidDatabaseUrl,

    #[error("Database pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("Identity provider URL must use HTTPS in production")]
    ProviderMustBeHttps,

    #[error("Gateway timeout must be between 1 and 60 seconds")]
    InvalidGatewayTimeout,

    #[error("From address must contain '@'")]
    InvalidFromEmail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_messages() {
        assert_eq!(
            ValidationError::MissingRequired("TOKEN_SECRET").to_string(),
            "Missing required configuration: TOKEN_SECRET"
        );
        assert_eq!(
            ValidationError::InvalidPort.to_string(),
            "Server port cannot be 0"
        );
    }
}
