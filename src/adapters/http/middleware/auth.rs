//! Authentication middleware and extractors.
//!
//! The middleware validates the Authorization header against the configured
//! `TokenVerifier` (in practice the ordered chain of provider-issued and
//! self-issued verifiers) and injects `CallerIdentity` into request
//! extensions. Handlers opt in with `RequireAuth` or `OptionalAuth`.
//!
//! Header handling:
//! - No Authorization header: the request continues unauthenticated;
//!   `RequireAuth` later rejects it with 401.
//! - Header present but not `Bearer <nonempty>`: 401 MALFORMED_CREDENTIAL
//!   immediately, no verifier is consulted.
//! - Token rejected by every verifier: 401 INVALID_CREDENTIAL.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::foundation::{CallerIdentity, ErrorCode};
use crate::ports::TokenVerifier;

use super::super::error::ApiError;

/// Middleware state: the verifier chain.
pub type AuthState = Arc<dyn TokenVerifier>;

pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .map(|h| h.to_str().map(str::to_owned));

    let token = match header {
        None => return next.run(request).await,
        Some(Ok(value)) => match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => {
                return ApiError::new(ErrorCode::MalformedCredential, "Malformed credential")
                    .into_response()
            }
        },
        Some(Err(_)) => {
            return ApiError::new(ErrorCode::MalformedCredential, "Malformed credential")
                .into_response()
        }
    };

    match verifier.verify(&token).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) if err.is_transient() => {
            tracing::error!(error = %err, "token verification unavailable");
            ApiError::from(err).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Extractor for handlers that require an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CallerIdentity);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<CallerIdentity>()
                .cloned()
                .map(RequireAuth)
                .ok_or_else(|| {
                    ApiError::new(ErrorCode::MalformedCredential, "Authentication required")
                })
        })
    }
}

/// Extractor for handlers where authentication is optional.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<CallerIdentity>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Ok(OptionalAuth(parts.extensions.get::<CallerIdentity>().cloned()))
        })
    }
}
