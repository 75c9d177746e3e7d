//! ListPurchasesHandler - purchase history for the authenticated user.

use std::sync::Arc;

use crate::domain::billing::{BillingError, PurchaseRecord};
use crate::domain::foundation::UserId;
use crate::ports::PurchaseLedger;

#[derive(Debug, Clone)]
pub struct ListPurchasesQuery {
    pub caller: UserId,
}

/// Returns the caller's purchases, newest first. An account with no
/// purchases gets an empty list, not an error.
pub struct ListPurchasesHandler {
    purchases: Arc<dyn PurchaseLedger>,
}

impl ListPurchasesHandler {
    pub fn new(purchases: Arc<dyn PurchaseLedger>) -> Self {
        Self { purchases }
    }

    pub async fn handle(
        &self,
        query: ListPurchasesQuery,
    ) -> Result<Vec<PurchaseRecord>, BillingError> {
        let records = self.purchases.list_for_user(&query.caller).await?;
        tracing::debug!(user_id = %query.caller, count = records.len(), "listed purchases");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    use crate::domain::billing::PlanType;
    use crate::domain::foundation::{DomainError, OrderId};

    #[derive(Default)]
    struct InMemoryLedger {
        records: Mutex<Vec<PurchaseRecord>>,
    }

    #[async_trait]
    impl PurchaseLedger for InMemoryLedger {
        async fn append_once(&self, record: &PurchaseRecord) -> Result<bool, DomainError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(true)
        }

        async fn list_for_user(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<PurchaseRecord>, DomainError> {
            let mut records: Vec<_> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.user_id == user_id)
                .cloned()
                .collect();
            records.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
            Ok(records)
        }
    }

    fn record(user: &str, days_ago: i64) -> PurchaseRecord {
        let when = Utc::now() - Duration::days(days_ago);
        PurchaseRecord {
            order_id: OrderId::new(),
            user_id: UserId::new(user).unwrap(),
            external_order_id: format!("order_{days_ago}"),
            payment_id: format!("pay_{days_ago}"),
            plan_type: PlanType::Premium,
            amount: 5000,
            currency: "INR".to_string(),
            payment_date: when,
            created_at: when,
        }
    }

    #[tokio::test]
    async fn returns_only_callers_purchases_newest_first() {
        let ledger = Arc::new(InMemoryLedger::default());
        for r in [record("uid-1", 5), record("uid-1", 1), record("uid-2", 0)] {
            ledger.append_once(&r).await.unwrap();
        }
        let handler = ListPurchasesHandler::new(ledger);

        let records = handler
            .handle(ListPurchasesQuery {
                caller: UserId::new("uid-1").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].external_order_id, "order_1");
        assert_eq!(records[1].external_order_id, "order_5");
    }

    #[tokio::test]
    async fn empty_history_is_an_empty_list() {
        let handler = ListPurchasesHandler::new(Arc::new(InMemoryLedger::default()));
        let records = handler
            .handle(ListPurchasesQuery {
                caller: UserId::new("uid-none").unwrap(),
            })
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
