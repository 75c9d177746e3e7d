//! Domain layer - pure business types and logic, no I/O.

pub mod account;
pub mod billing;
pub mod catalog;
pub mod community;
pub mod foundation;
