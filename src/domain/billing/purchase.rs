//! Denormalized purchase history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, UserId};

use super::plan::PlanType;

/// One row of purchase history, written when an order completes.
///
/// Append-only and keyed by the order id, so replayed completion callbacks
/// cannot create a second row for the same order. Duplicates order fields on
/// purpose; history queries never join back to `orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub external_order_id: String,
    pub payment_id: String,
    pub plan_type: PlanType,
    /// Amount in minor units, copied from the order.
    pub amount: i64,
    pub currency: String,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
