//! Transactional mail adapter.

mod relay;

pub use relay::{RelayConfig, RelayMailer};
