//! Account HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::AccountAppState;
pub use routes::account_router;
