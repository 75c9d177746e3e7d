//! Ordered chain of token verifiers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, CallerIdentity};
use crate::ports::TokenVerifier;

/// Tries each verifier in order and accepts the first success.
///
/// A rejection moves on to the next verifier; a transient failure
/// (`ServiceUnavailable`) aborts the chain immediately, because "the provider
/// is down" must never degrade into "your token is invalid" for a token the
/// provider would have accepted.
pub struct ChainTokenVerifier {
    verifiers: Vec<Arc<dyn TokenVerifier>>,
}

impl ChainTokenVerifier {
    /// Build a chain. Order matters: put the primary trust source first.
    pub fn new(verifiers: Vec<Arc<dyn TokenVerifier>>) -> Self {
        Self { verifiers }
    }
}

#[async_trait]
impl TokenVerifier for ChainTokenVerifier {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        for verifier in &self.verifiers {
            match verifier.verify(token).await {
                Ok(identity) => return Ok(identity),
                Err(err) if err.is_transient() => return Err(err),
                Err(_) => continue,
            }
        }
        Err(AuthError::InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::mock::MockVerifier;
    use crate::domain::foundation::UserId;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[tokio::test]
    async fn first_success_wins() {
        let chain = ChainTokenVerifier::new(vec![
            Arc::new(MockVerifier::accepting("tok-a", "uid-a")),
            Arc::new(MockVerifier::accepting("tok-a", "uid-b")),
        ]);
        let identity = chain.verify("tok-a").await.unwrap();
        assert_eq!(identity.subject, uid("uid-a"));
    }

    #[tokio::test]
    async fn falls_through_to_later_verifier() {
        let chain = ChainTokenVerifier::new(vec![
            Arc::new(MockVerifier::accepting("tok-a", "uid-a")),
            Arc::new(MockVerifier::accepting("tok-b", "uid-b")),
        ]);
        let identity = chain.verify("tok-b").await.unwrap();
        assert_eq!(identity.subject, uid("uid-b"));
    }

    #[tokio::test]
    async fn all_rejections_yield_invalid_credential() {
        let chain = ChainTokenVerifier::new(vec![
            Arc::new(MockVerifier::accepting("tok-a", "uid-a")),
            Arc::new(MockVerifier::accepting("tok-b", "uid-b")),
        ]);
        assert!(matches!(
            chain.verify("tok-z").await,
            Err(AuthError::InvalidCredential)
        ));
    }

    #[tokio::test]
    async fn transient_failure_short_circuits() {
        let chain = ChainTokenVerifier::new(vec![
            Arc::new(MockVerifier::unavailable()),
            Arc::new(MockVerifier::accepting("tok-a", "uid-a")),
        ]);
        // tok-a would be accepted by the second verifier, but the first is
        // down, so the result must be transient, not a rejection.
        assert!(matches!(
            chain.verify("tok-a").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn empty_chain_rejects_everything() {
        let chain = ChainTokenVerifier::new(vec![]);
        assert!(matches!(
            chain.verify("anything").await,
            Err(AuthError::InvalidCredential)
        ));
    }
}
