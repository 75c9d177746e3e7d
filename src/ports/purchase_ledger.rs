//! Purchase history port.

use async_trait::async_trait;

use crate::domain::billing::PurchaseRecord;
use crate::domain::foundation::{DomainError, UserId};

/// Append-only store of completed purchases.
///
/// # Contract
///
/// `append_once` is keyed by the record's order id: appending a record for an
/// order that already has one is a no-op returning `false`. This is what
/// makes replayed completion callbacks safe.
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Append a purchase record unless one already exists for the order.
    /// Returns `true` if a row was written.
    async fn append_once(&self, record: &PurchaseRecord) -> Result<bool, DomainError>;

    /// All purchases for a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, DomainError>;
}
