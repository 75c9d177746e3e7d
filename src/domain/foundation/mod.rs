//! Shared domain primitives: identifiers, caller identity, and error types.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, CallerIdentity};
pub use errors::{DomainError, ErrorCode};
pub use ids::{OrderId, UserId};
