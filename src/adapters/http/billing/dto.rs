//! Request/response bodies for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::CreateOrderResult;
use crate::domain::billing::{PurchaseRecord, ReferralVerdict};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub plan_type: String,
    pub referral_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub external_order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

impl From<CreateOrderResult> for CreateOrderResponse {
    fn from(result: CreateOrderResult) -> Self {
        Self {
            order_id: result.order_id.to_string(),
            external_order_id: result.external_order_id,
            amount: result.amount,
            currency: result.currency,
            key_id: result.gateway_key,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReferralRequest {
    pub referral_code: String,
    pub plan_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReferralResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_to_pay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<ReferralVerdict> for VerifyReferralResponse {
    fn from(verdict: ReferralVerdict) -> Self {
        match verdict {
            ReferralVerdict::Accepted {
                discount_percent,
                amount_to_pay,
            } => Self {
                valid: true,
                discount_percent: Some(discount_percent),
                amount_to_pay: Some(amount_to_pay),
                reason: None,
            },
            ReferralVerdict::Rejected(rejection) => Self {
                valid: false,
                discount_percent: None,
                amount_to_pay: None,
                reason: Some(rejection.message().to_string()),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: Option<String>,
    pub status: String,
    pub signature: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub status: &'static str,
    pub order_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub order_id: String,
    pub external_order_id: String,
    pub payment_id: String,
    pub plan_type: String,
    pub amount: i64,
    pub currency: String,
    pub payment_date: chrono::DateTime<chrono::Utc>,
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(record: PurchaseRecord) -> Self {
        Self {
            order_id: record.order_id.to_string(),
            external_order_id: record.external_order_id,
            payment_id: record.payment_id,
            plan_type: record.plan_type.as_str().to_string(),
            amount: record.amount,
            currency: record.currency,
            payment_date: record.payment_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PurchaseListResponse {
    pub orders: Vec<PurchaseResponse>,
}
