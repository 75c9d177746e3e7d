//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CreateOrderCommand, CreateOrderHandler, ListPurchasesHandler, ListPurchasesQuery,
    ReconcileOutcome, ReconcilePaymentCommand, ReconcilePaymentHandler,
};
use crate::domain::billing::{resolve_referral_now, CallbackSigner, PlanType};
use crate::domain::foundation::ErrorCode;
use crate::ports::{OrderRepository, PaymentGateway, ProfileStore, PurchaseLedger};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::dto::{
    CreateOrderRequest, CreateOrderResponse, PurchaseListResponse, PurchaseResponse,
    VerifyPaymentRequest, VerifyPaymentResponse, VerifyReferralRequest, VerifyReferralResponse,
};

/// Shared state for payment endpoints.
#[derive(Clone)]
pub struct BillingAppState {
    pub orders: Arc<dyn OrderRepository>,
    pub purchases: Arc<dyn PurchaseLedger>,
    pub profiles: Arc<dyn ProfileStore>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub signer: Arc<CallbackSigner>,
    pub currency: String,
}

impl BillingAppState {
    fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.orders.clone(), self.gateway.clone(), self.currency.clone())
    }

    fn reconcile_handler(&self) -> ReconcilePaymentHandler {
        ReconcilePaymentHandler::new(
            self.orders.clone(),
            self.purchases.clone(),
            self.profiles.clone(),
            self.signer.clone(),
        )
    }

    fn list_purchases_handler(&self) -> ListPurchasesHandler {
        ListPurchasesHandler::new(self.purchases.clone())
    }
}

fn parse_plan(raw: &str) -> Result<PlanType, ApiError> {
    raw.parse::<PlanType>().map_err(|_| {
        ApiError::new(
            ErrorCode::ValidationFailed,
            "planType must be 'basicPlan' or 'premiumPlan'",
        )
    })
}

pub async fn create_order(
    State(state): State<BillingAppState>,
    RequireAuth(caller): RequireAuth,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_type = parse_plan(&body.plan_type)?;
    let result = state
        .create_order_handler()
        .handle(CreateOrderCommand {
            caller: caller.subject,
            plan_type,
            referral_code: body.referral_code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(CreateOrderResponse::from(result))))
}

pub async fn verify_referral(
    RequireAuth(_caller): RequireAuth,
    Json(body): Json<VerifyReferralRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_type = parse_plan(&body.plan_type)?;
    let verdict = resolve_referral_now(&body.referral_code, plan_type);
    Ok(Json(VerifyReferralResponse::from(verdict)))
}

pub async fn verify_payment(
    State(state): State<BillingAppState>,
    RequireAuth(caller): RequireAuth,
    Json(body): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .reconcile_handler()
        .handle(ReconcilePaymentCommand {
            caller: caller.subject,
            external_order_id: body.order_id,
            payment_id: body.payment_id,
            status: body.status,
            signature: body.signature,
        })
        .await?;

    let (status, order_id) = match outcome {
        ReconcileOutcome::Completed { order_id } => ("completed", order_id),
        ReconcileOutcome::Failed { order_id } => ("failed", order_id),
        ReconcileOutcome::AlreadyProcessed { order_id } => ("already_processed", order_id),
    };
    Ok(Json(VerifyPaymentResponse {
        status,
        order_id: order_id.to_string(),
    }))
}

pub async fn list_purchases(
    State(state): State<BillingAppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .list_purchases_handler()
        .handle(ListPurchasesQuery {
            caller: caller.subject,
        })
        .await?;
    Ok(Json(PurchaseListResponse {
        orders: records.into_iter().map(PurchaseResponse::from).collect(),
    }))
}
