//! PostgreSQL implementation of ProfileStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::account::{MembershipStatus, ProfileUpdate, UserProfile};
use crate::domain::billing::{MembershipActivation, PlanType};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::ProfileStore;

pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    email: String,
    display_name: Option<String>,
    photo_url: Option<String>,
    email_verified: bool,
    membership_status: String,
    plan_type: Option<String>,
    amount_paid: Option<i64>,
    currency: Option<String>,
    subscription_start: Option<DateTime<Utc>>,
    last_payment: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let membership_status = match row.membership_status.as_str() {
            "none" => MembershipStatus::None,
            "active" => MembershipStatus::Active,
            other => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid membership_status: {other}"),
                ))
            }
        };
        let plan_type = row
            .plan_type
            .as_deref()
            .map(str::parse::<PlanType>)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid plan_type: {e}"))
            })?;

        Ok(UserProfile {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {e}"))
            })?,
            email: row.email,
            display_name: row.display_name,
            photo_url: row.photo_url,
            email_verified: row.email_verified,
            membership_status,
            plan_type,
            amount_paid: row.amount_paid,
            currency: row.currency,
            subscription_start: row.subscription_start,
            last_payment: row.last_payment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn db_err(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{context}: {e}"))
}

const SELECT_COLUMNS: &str = "user_id, email, display_name, photo_url, email_verified, \
     membership_status, plan_type, amount_paid, currency, subscription_start, \
     last_payment, created_at, updated_at";

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn insert(&self, profile: &UserProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, email, display_name, photo_url, email_verified,
                membership_status, plan_type, amount_paid, currency,
                subscription_start, last_payment, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.photo_url)
        .bind(profile.email_verified)
        .bind(profile.membership_status.as_str())
        .bind(profile.plan_type.map(|p| p.as_str()))
        .bind(profile.amount_paid)
        .bind(&profile.currency)
        .bind(profile.subscription_start)
        .bind(profile.last_payment)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to insert profile", e))?;
        Ok(())
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch profile", e))?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn update(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE users
            SET display_name = COALESCE($1, display_name),
                photo_url = COALESCE($2, photo_url),
                updated_at = NOW()
            WHERE user_id = $3
            "#,
        )
        .bind(&update.display_name)
        .bind(&update.photo_url)
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update profile", e))?;
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete profile", e))?;
        Ok(())
    }

    async fn activate_membership(
        &self,
        activation: &MembershipActivation,
    ) -> Result<(), DomainError> {
        // Upsert so a completion callback still activates membership when
        // the profile row predates the local store.
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, email, email_verified, membership_status, plan_type,
                amount_paid, currency, subscription_start, last_payment,
                created_at, updated_at
            ) VALUES ($1, '', FALSE, 'active', $2, $3, $4, $5, $6, NOW(), NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET membership_status = 'active',
                plan_type = EXCLUDED.plan_type,
                amount_paid = EXCLUDED.amount_paid,
                currency = EXCLUDED.currency,
                subscription_start = EXCLUDED.subscription_start,
                last_payment = EXCLUDED.last_payment,
                updated_at = NOW()
            "#,
        )
        .bind(activation.user_id.as_str())
        .bind(activation.plan_type.as_str())
        .bind(activation.amount_paid)
        .bind(&activation.currency)
        .bind(activation.subscription_start)
        .bind(activation.last_payment)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to activate membership", e))?;
        Ok(())
    }
}
