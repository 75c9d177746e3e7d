//! Order ledger persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::billing::{Order, OrderStatus};
use crate::domain::foundation::{DomainError, OrderId, UserId};

/// Persistent store for purchase orders.
///
/// # Contract
///
/// - `create` persists a `pending` order and is called before any gateway
///   interaction, so abandoned orders remain auditable.
/// - `attach_external_id` is a separate write after the gateway call; the
///   intermediate state (order exists, no external id) is expected.
/// - `transition_if_pending` is the only path to a terminal status and must
///   be a compare-and-swap on `status = 'pending'`: it returns `false`
///   without modifying anything when the order is already terminal. Racing
///   duplicate callbacks therefore serialize on the row, and exactly one
///   wins.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new pending order.
    async fn create(&self, order: &Order) -> Result<(), DomainError>;

    /// Attach the gateway's order id once the remote order exists.
    async fn attach_external_id(
        &self,
        order_id: &OrderId,
        external_order_id: &str,
    ) -> Result<(), DomainError>;

    /// Find the order with this external id belonging to this user.
    ///
    /// Returns `None` both when no such order exists and when it belongs to
    /// a different user; callers must not distinguish the two.
    async fn find_by_external_id_for_user(
        &self,
        external_order_id: &str,
        user_id: &UserId,
    ) -> Result<Option<Order>, DomainError>;

    /// Atomically move a pending order to a terminal status, recording the
    /// payment id, signature, and update time. Returns `true` if this call
    /// performed the transition, `false` if the order was no longer pending.
    async fn transition_if_pending(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
        payment_id: Option<&str>,
        signature: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
