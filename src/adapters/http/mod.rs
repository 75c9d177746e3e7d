//! HTTP adapters - the REST API surface.
//!
//! Each domain module has its own router with a per-module application
//! state; `api_router` mounts them under `/api` and applies the shared
//! authentication middleware.

pub mod account;
pub mod billing;
pub mod catalog;
pub mod community;
pub mod error;
pub mod middleware;

pub use account::{account_router, AccountAppState};
pub use billing::{billing_router, BillingAppState};
pub use catalog::{catalog_router, CatalogAppState};
pub use community::{community_router, CommunityAppState};
pub use error::ApiError;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use middleware::{auth_middleware, AuthState};

/// Assemble the full API router.
///
/// The auth middleware runs on every route; it only rejects requests that
/// present a credential and fail verification. Endpoints that require a
/// caller enforce it with the `RequireAuth` extractor.
pub fn api_router(
    auth: AuthState,
    account: AccountAppState,
    billing: BillingAppState,
    catalog: CatalogAppState,
    community: CommunityAppState,
) -> Router {
    let api = Router::new()
        .nest("/auth", account_router().with_state(account))
        .nest("/payment", billing_router().with_state(billing))
        .nest("/courses", catalog_router().with_state(catalog))
        .merge(community_router().with_state(community));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(auth, auth_middleware))
}

async fn health() -> StatusCode {
    StatusCode::OK
}
