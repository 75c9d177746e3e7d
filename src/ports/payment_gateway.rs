//! Payment gateway port.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Request to create a remote gateway order.
#[derive(Debug, Clone)]
pub struct GatewayOrderRequest {
    /// Amount in minor currency units, exactly as stored on the local order.
    pub amount: i64,
    pub currency: String,
    /// Local order id, passed as the gateway receipt for cross-reference.
    pub receipt: String,
    /// Free-form metadata echoed back by the gateway.
    pub notes: Value,
}

/// A remote order created at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    /// The gateway's order identifier, the join key for reconciliation.
    pub external_order_id: String,
}

/// Errors from the payment gateway.
#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    /// Non-success response from the gateway. Terminal for this request.
    #[error("Gateway rejected the order: {0}")]
    Rejected(String),

    /// The gateway did not respond within the deadline. Retryable.
    #[error("Gateway timed out")]
    Timeout,

    /// Transport-level failure reaching the gateway.
    #[error("Gateway unreachable: {0}")]
    Unreachable(String),
}

/// External payment gateway.
///
/// Implementations must enforce their own request deadline and surface it as
/// `PaymentGatewayError::Timeout` rather than hanging the caller.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a remote order for the given amount.
    async fn create_order(
        &self,
        request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, PaymentGatewayError>;

    /// Public key id the frontend needs to open the gateway's checkout.
    fn key_id(&self) -> &str;
}
