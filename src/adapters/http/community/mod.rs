//! Community HTTP endpoints: contact, collaboration, newsletter.

mod dto;
mod handlers;
mod routes;

pub use handlers::CommunityAppState;
pub use routes::community_router;
