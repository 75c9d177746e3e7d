//! Membership activation payload.

use chrono::{DateTime, Utc};

use crate::domain::foundation::UserId;

use super::plan::PlanType;

/// Membership fields written to the user profile when an order completes.
///
/// Values are snapshotted from the order at creation time, never re-derived
/// from the current price table. The upsert is last-writer-wins; there is no
/// optimistic concurrency token on the profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipActivation {
    pub user_id: UserId,
    pub plan_type: PlanType,
    /// Amount paid in minor units.
    pub amount_paid: i64,
    pub currency: String,
    pub subscription_start: DateTime<Utc>,
    pub last_payment: DateTime<Utc>,
}
