//! CreateOrderHandler - creates a local pending order, then a matching
//! remote order at the payment gateway.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::billing::{
    resolve_referral_now, BillingError, NewOrder, Order, PlanType, ReferralVerdict,
};
use crate::domain::foundation::{OrderId, UserId};
use crate::ports::{GatewayOrderRequest, OrderRepository, PaymentGateway, PaymentGatewayError};

/// Command to create a purchase order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub caller: UserId,
    pub plan_type: PlanType,
    pub referral_code: Option<String>,
}

/// Result returned to the frontend to open checkout.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order_id: OrderId,
    pub external_order_id: String,
    /// Amount in minor units, after any referral discount.
    pub amount: i64,
    pub currency: String,
    /// Public gateway key the frontend checkout needs.
    pub gateway_key: String,
}

/// Handler for order creation.
///
/// The local order is persisted `pending` before the gateway is contacted:
/// a gateway failure leaves an auditable abandoned order with no external
/// id, surfaced to the caller and never retried here. Attaching the
/// external id is a second, separate write.
pub struct CreateOrderHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl CreateOrderHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGateway>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            orders,
            gateway,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateOrderCommand,
    ) -> Result<CreateOrderResult, BillingError> {
        // An invalid or expired referral code silently falls back to the
        // base price; the order still succeeds.
        let mut amount = cmd.plan_type.base_price();
        if let Some(code) = cmd.referral_code.as_deref() {
            if let ReferralVerdict::Accepted { amount_to_pay, .. } =
                resolve_referral_now(code, cmd.plan_type)
            {
                amount = amount_to_pay;
            } else {
                tracing::debug!(code, "referral code did not apply, using base price");
            }
        }

        let order = Order::pending(
            NewOrder {
                user_id: cmd.caller.clone(),
                plan_type: cmd.plan_type,
                amount,
                currency: self.currency.clone(),
                referral_code: cmd.referral_code.clone(),
            },
            Utc::now(),
        );
        self.orders.create(&order).await?;

        let request = GatewayOrderRequest {
            amount: order.amount,
            currency: order.currency.clone(),
            receipt: order.id.to_string(),
            notes: json!({
                "planType": cmd.plan_type.as_str(),
                "userId": cmd.caller.as_str(),
                "orderId": order.id.to_string(),
                "referralCode": cmd.referral_code,
            }),
        };

        let gateway_order = self.gateway.create_order(request).await.map_err(|e| {
            tracing::warn!(order_id = %order.id, error = %e, "gateway order creation failed");
            match e {
                PaymentGatewayError::Timeout => BillingError::GatewayTimeout,
                PaymentGatewayError::Rejected(msg) => BillingError::Gateway(msg),
                PaymentGatewayError::Unreachable(msg) => BillingError::Gateway(msg),
            }
        })?;

        self.orders
            .attach_external_id(&order.id, &gateway_order.external_order_id)
            .await?;

        tracing::info!(
            order_id = %order.id,
            external_order_id = %gateway_order.external_order_id,
            amount,
            "order created"
        );

        Ok(CreateOrderResult {
            order_id: order.id,
            external_order_id: gateway_order.external_order_id,
            amount,
            currency: order.currency,
            gateway_key: self.gateway.key_id().to_string(),
        })
    }
}
