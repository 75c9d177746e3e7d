//! Billing handlers: order creation, payment reconciliation, and purchase
//! history.

mod create_order;
mod list_purchases;
mod reconcile_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use list_purchases::{ListPurchasesHandler, ListPurchasesQuery};
pub use reconcile_payment::{
    ReconcileOutcome, ReconcilePaymentCommand, ReconcilePaymentHandler,
};
