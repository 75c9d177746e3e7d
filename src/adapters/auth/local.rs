//! Self-issued HS256 tokens.
//!
//! Minted at login and signup so that authenticated requests do not
//! round-trip to the identity provider. Implements both `TokenIssuer`
//! (signing) and `TokenVerifier` (validation).

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, CallerIdentity, UserId};
use crate::ports::{TokenIssuer, TokenVerifier};

/// Claims carried in a self-issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies locally signed HS256 tokens.
pub struct LocalTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl LocalTokenService {
    /// Build from the shared secret and token lifetime.
    pub fn new(secret: &SecretString, ttl: std::time::Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl: Duration::seconds(ttl.as_secs() as i64),
        }
    }
}

impl TokenIssuer for LocalTokenService {
    fn issue(&self, subject: &UserId) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::service_unavailable(format!("token signing failed: {e}")))
    }
}

#[async_trait]
impl TokenVerifier for LocalTokenService {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidCredential)?;

        let subject =
            UserId::new(data.claims.sub).map_err(|_| AuthError::InvalidCredential)?;
        Ok(CallerIdentity::new(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    fn service(secret: &str) -> LocalTokenService {
        LocalTokenService::new(
            &SecretString::new(secret.to_string()),
            StdDuration::from_secs(3600),
        )
    }

    #[tokio::test]
    async fn issued_token_verifies_to_same_subject() {
        let svc = service("local-secret");
        let token = svc.issue(&UserId::new("uid-42").unwrap()).unwrap();
        let identity = svc.verify(&token).await.unwrap();
        assert_eq!(identity.subject.as_str(), "uid-42");
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = service("secret-a")
            .issue(&UserId::new("uid-42").unwrap())
            .unwrap();
        assert!(matches!(
            service("secret-b").verify(&token).await,
            Err(AuthError::InvalidCredential)
        ));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        assert!(matches!(
            service("local-secret").verify("not.a.jwt").await,
            Err(AuthError::InvalidCredential)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let svc = service("local-secret");
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "uid-42".to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"local-secret"),
        )
        .unwrap();

        assert!(matches!(
            svc.verify(&token).await,
            Err(AuthError::InvalidCredential)
        ));
    }
}
