//! Application layer - command and query handlers orchestrating domain
//! logic through the ports.

pub mod handlers;
