//! Course catalog HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::CatalogAppState;
pub use routes::catalog_router;
