//! PostgreSQL implementation of OrderRepository.
//!
//! The terminal status transition is a single UPDATE guarded by
//! `status = 'pending'`, so concurrent callbacks for the same order
//! serialize on the row and exactly one caller observes the transition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Order, OrderStatus, PlanType};
use crate::domain::foundation::{DomainError, ErrorCode, OrderId, UserId};
use crate::ports::OrderRepository;

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: String,
    plan_type: String,
    amount: i64,
    currency: String,
    status: String,
    external_order_id: Option<String>,
    referral_code: Option<String>,
    payment_id: Option<String>,
    signature: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: OrderId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {e}"))
            })?,
            plan_type: row.plan_type.parse::<PlanType>().map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid plan_type: {e}"))
            })?,
            amount: row.amount,
            currency: row.currency,
            status: row.status.parse::<OrderStatus>().map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid status: {e}"))
            })?,
            external_order_id: row.external_order_id,
            referral_code: row.referral_code,
            payment_id: row.payment_id,
            signature: row.signature,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn db_err(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{context}: {e}"))
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, plan_type, amount, currency, status,
                external_order_id, referral_code, payment_id, signature,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_str())
        .bind(order.plan_type.as_str())
        .bind(order.amount)
        .bind(&order.currency)
        .bind(order.status.as_str())
        .bind(&order.external_order_id)
        .bind(&order.referral_code)
        .bind(&order.payment_id)
        .bind(&order.signature)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to create order", e))?;
        Ok(())
    }

    async fn attach_external_id(
        &self,
        order_id: &OrderId,
        external_order_id: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE orders SET external_order_id = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(external_order_id)
        .bind(order_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to attach external order id", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("No order with id {order_id}"),
            ));
        }
        Ok(())
    }

    async fn find_by_external_id_for_user(
        &self,
        external_order_id: &str,
        user_id: &UserId,
    ) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, plan_type, amount, currency, status,
                   external_order_id, referral_code, payment_id, signature,
                   created_at, updated_at
            FROM orders
            WHERE external_order_id = $1 AND user_id = $2
            "#,
        )
        .bind(external_order_id)
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to look up order", e))?;

        row.map(Order::try_from).transpose()
    }

    async fn transition_if_pending(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
        payment_id: Option<&str>,
        signature: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $1, payment_id = $2, signature = $3, updated_at = $4
            WHERE id = $5 AND status = 'pending'
            "#,
        )
        .bind(status.as_str())
        .bind(payment_id)
        .bind(signature)
        .bind(updated_at)
        .bind(order_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to transition order", e))?;

        Ok(result.rows_affected() == 1)
    }
}
