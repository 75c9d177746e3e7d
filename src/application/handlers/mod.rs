//! Command/query handlers, grouped by domain.

pub mod account;
pub mod billing;
