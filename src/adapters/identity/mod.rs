//! Identity provider adapter.

mod rest;

pub use rest::{IdentityConfig, RestIdentityDirectory};
