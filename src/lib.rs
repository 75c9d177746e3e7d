//! CourseKit - REST backend for a course-selling platform.
//!
//! Exposes account, billing, catalog, and community endpoints backed by
//! PostgreSQL, delegating identity to a managed provider and payments to an
//! external gateway.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
