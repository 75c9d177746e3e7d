//! Purchase order aggregate.
//!
//! Orders are created `pending` before the gateway is contacted and move
//! exactly once to a terminal state during reconciliation. The gateway's
//! external order id is attached in a second write after creation, so an
//! order with no external id is a defined partial-failure state (the gateway
//! call failed), not a broken invariant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{OrderId, UserId};

use super::plan::PlanType;

/// Order lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error for status strings outside the order lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

/// Status a payment callback may request.
///
/// The callback endpoint accepts only terminal states; anything else is a
/// validation error rather than being persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStatus {
    Completed,
    Failed,
}

impl CallbackStatus {
    pub fn as_order_status(&self) -> OrderStatus {
        match self {
            CallbackStatus::Completed => OrderStatus::Completed,
            CallbackStatus::Failed => OrderStatus::Failed,
        }
    }
}

impl FromStr for CallbackStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(CallbackStatus::Completed),
            "failed" => Ok(CallbackStatus::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A purchase order as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub plan_type: PlanType,
    /// Amount in minor currency units, snapshotted at creation.
    pub amount: i64,
    pub currency: String,
    pub status: OrderStatus,
    /// Gateway order id; `None` until the gateway call returns, and the join
    /// key for reconciliation once set. Unique per order.
    pub external_order_id: Option<String>,
    pub referral_code: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a new pending order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub plan_type: PlanType,
    pub amount: i64,
    pub currency: String,
    pub referral_code: Option<String>,
}

impl Order {
    /// Builds a fresh pending order from creation fields.
    pub fn pending(new: NewOrder, now: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::new(),
            user_id: new.user_id,
            plan_type: new.plan_type,
            amount: new.amount,
            currency: new.currency,
            status: OrderStatus::Pending,
            external_order_id: None,
            referral_code: new.referral_code,
            payment_id: None,
            signature: None,
            created_at: now,
            updated_at: now,
        }
    }
}
