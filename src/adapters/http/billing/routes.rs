//! Route table for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_order, list_purchases, verify_payment, verify_referral, BillingAppState,
};

/// Payment routes, mounted at `/api/payment`.
///
/// - `POST /create-order` - create a pending order and its gateway twin
/// - `POST /verify-referral` - check a referral code against a plan
/// - `POST /verify-payment` - reconcile a gateway completion callback
/// - `GET /orders` - the caller's purchase history
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-referral", post(verify_referral))
        .route("/verify-payment", post(verify_payment))
        .route("/orders", get(list_purchases))
}
