//! Route table for catalog endpoints.

use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers::{
    create_course, delete_course, get_course, list_courses, update_course, CatalogAppState,
};

/// Catalog routes, mounted at `/api/courses`.
///
/// Reads are public; writes require authentication.
pub fn catalog_router() -> Router<CatalogAppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/", post(create_course))
        .route("/:id", get(get_course))
        .route("/:id", put(update_course))
        .route("/:id", delete(delete_course))
}
