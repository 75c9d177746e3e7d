//! PostgreSQL implementation of PurchaseLedger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{PlanType, PurchaseRecord};
use crate::domain::foundation::{DomainError, ErrorCode, OrderId, UserId};
use crate::ports::PurchaseLedger;

pub struct PostgresPurchaseLedger {
    pool: PgPool,
}

impl PostgresPurchaseLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    order_id: Uuid,
    user_id: String,
    external_order_id: String,
    payment_id: String,
    plan_type: String,
    amount: i64,
    currency: String,
    payment_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PurchaseRow> for PurchaseRecord {
    type Error = DomainError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        Ok(PurchaseRecord {
            order_id: OrderId::from_uuid(row.order_id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {e}"))
            })?,
            external_order_id: row.external_order_id,
            payment_id: row.payment_id,
            plan_type: row.plan_type.parse::<PlanType>().map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid plan_type: {e}"))
            })?,
            amount: row.amount,
            currency: row.currency,
            payment_date: row.payment_date,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PurchaseLedger for PostgresPurchaseLedger {
    async fn append_once(&self, record: &PurchaseRecord) -> Result<bool, DomainError> {
        // The primary key on order_id makes the append idempotent.
        let result = sqlx::query(
            r#"
            INSERT INTO user_orders (
                order_id, user_id, external_order_id, payment_id, plan_type,
                amount, currency, payment_date, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (order_id) DO NOTHING
            "#,
        )
        .bind(record.order_id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(&record.external_order_id)
        .bind(&record.payment_id)
        .bind(record.plan_type.as_str())
        .bind(record.amount)
        .bind(&record.currency)
        .bind(record.payment_date)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append purchase: {e}"),
            )
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, DomainError> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(
            r#"
            SELECT order_id, user_id, external_order_id, payment_id, plan_type,
                   amount, currency, payment_date, created_at
            FROM user_orders
            WHERE user_id = $1
            ORDER BY payment_date DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list purchases: {e}"),
            )
        })?;

        rows.into_iter().map(PurchaseRecord::try_from).collect()
    }
}
