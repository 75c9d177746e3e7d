//! Razorpay Orders API adapter.
//!
//! Implements `PaymentGateway` against `POST /v1/orders` with HTTP basic
//! auth (key id / key secret). The amount is forwarded exactly as given;
//! unit conversion is not this adapter's business.
//!
//! The call runs under an explicit deadline so a stalled gateway surfaces as
//! `PaymentGatewayError::Timeout` instead of hanging the request.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{GatewayOrder, GatewayOrderRequest, PaymentGateway, PaymentGatewayError};

/// Razorpay connection settings.
#[derive(Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: SecretString,
    pub base_url: String,
    pub timeout: Duration,
}

/// `PaymentGateway` backed by the Razorpay Orders API.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    description: String,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.config.base_url.trim_end_matches('/'))
    }

    async fn post_order(
        &self,
        request: &GatewayOrderRequest,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        let body = CreateOrderBody {
            amount: request.amount,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: &request.notes,
        };

        let response = self
            .http
            .post(self.orders_url())
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentGatewayError::Timeout
                } else {
                    PaymentGatewayError::Unreachable(e.to_string())
                }
            })?;

        if response.status().is_success() {
            let order = response
                .json::<OrderResponse>()
                .await
                .map_err(|e| PaymentGatewayError::Unreachable(format!("malformed response: {e}")))?;
            return Ok(GatewayOrder {
                external_order_id: order.id,
            });
        }

        let status = response.status();
        let description = response
            .json::<ErrorResponse>()
            .await
            .map(|b| b.error.description)
            .unwrap_or_default();
        tracing::warn!(%status, %description, "gateway rejected order creation");
        Err(PaymentGatewayError::Rejected(if description.is_empty() {
            format!("HTTP {status}")
        } else {
            description
        }))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        match tokio::time::timeout(self.config.timeout, self.post_order(&request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.timeout.as_secs(),
                    "gateway order creation timed out"
                );
                Err(PaymentGatewayError::Timeout)
            }
        }
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }
}
