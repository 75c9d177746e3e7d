//! Token verification adapters.
//!
//! Two trust sources implement `TokenVerifier`: the identity provider's own
//! tokens (via the `UserDirectory` adapter) and locally signed HS256 tokens
//! minted at login. `ChainTokenVerifier` composes them in order.

mod chain;
mod local;
mod provider;

#[cfg(test)]
pub mod mock;

pub use chain::ChainTokenVerifier;
pub use local::LocalTokenService;
pub use provider::ProviderTokenVerifier;
