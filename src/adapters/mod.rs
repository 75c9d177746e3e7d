//! Adapters - implementations of the port interfaces.
//!
//! - `auth` - token verification strategies and the verifier chain
//! - `identity` - identity provider REST client
//! - `razorpay` - payment gateway client
//! - `email` - transactional mail relay client
//! - `postgres` - persistence
//! - `http` - the REST API surface

pub mod auth;
pub mod email;
pub mod http;
pub mod identity;
pub mod postgres;
pub mod razorpay;
