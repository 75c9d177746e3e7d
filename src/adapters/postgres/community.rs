//! PostgreSQL implementations of the community ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::community::{CollaborationEnquiry, ContactQuery, NewsletterSubscriber};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{CollaborationInbox, ContactInbox, NewsletterList};

fn db_err(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{context}: {e}"))
}

pub struct PostgresContactInbox {
    pool: PgPool,
}

impl PostgresContactInbox {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    subject: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl ContactInbox for PostgresContactInbox {
    async fn submit(&self, query: &ContactQuery) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contact_queries (id, name, email, subject, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(query.id)
        .bind(&query.name)
        .bind(&query.email)
        .bind(&query.subject)
        .bind(&query.message)
        .bind(&query.status)
        .bind(query.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to submit contact query", e))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ContactQuery>, DomainError> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, subject, message, status, created_at \
             FROM contact_queries ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list contact queries", e))?;

        Ok(rows
            .into_iter()
            .map(|row| ContactQuery {
                id: row.id,
                name: row.name,
                email: row.email,
                subject: row.subject,
                message: row.message,
                status: row.status,
                created_at: row.created_at,
            })
            .collect())
    }
}

pub struct PostgresCollaborationInbox {
    pool: PgPool,
}

impl PostgresCollaborationInbox {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CollaborationRow {
    id: Uuid,
    email: String,
    user_id: Option<String>,
    status: String,
    enquiry_date: DateTime<Utc>,
}

#[async_trait]
impl CollaborationInbox for PostgresCollaborationInbox {
    async fn submit(&self, enquiry: &CollaborationEnquiry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO collaboration_enquiries (id, email, user_id, status, enquiry_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(enquiry.id)
        .bind(&enquiry.email)
        .bind(enquiry.user_id.as_ref().map(|u| u.as_str()))
        .bind(&enquiry.status)
        .bind(enquiry.enquiry_date)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to submit collaboration enquiry", e))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CollaborationEnquiry>, DomainError> {
        let rows: Vec<CollaborationRow> = sqlx::query_as(
            "SELECT id, email, user_id, status, enquiry_date \
             FROM collaboration_enquiries ORDER BY enquiry_date DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list collaboration enquiries", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(CollaborationEnquiry {
                    id: row.id,
                    email: row.email,
                    user_id: row
                        .user_id
                        .map(UserId::new)
                        .transpose()
                        .map_err(|e| {
                            DomainError::new(
                                ErrorCode::DatabaseError,
                                format!("Invalid user_id: {e}"),
                            )
                        })?,
                    status: row.status,
                    enquiry_date: row.enquiry_date,
                })
            })
            .collect()
    }
}

pub struct PostgresNewsletterList {
    pool: PgPool,
}

impl PostgresNewsletterList {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    email: String,
    subscribed_at: DateTime<Utc>,
}

#[async_trait]
impl NewsletterList for PostgresNewsletterList {
    async fn subscribe(&self, subscriber: &NewsletterSubscriber) -> Result<(), DomainError> {
        // Re-subscribing an existing address is a silent success.
        sqlx::query(
            r#"
            INSERT INTO newsletter_subscribers (id, email, subscribed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(subscriber.id)
        .bind(&subscriber.email)
        .bind(subscriber.subscribed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to subscribe", e))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<NewsletterSubscriber>, DomainError> {
        let rows: Vec<SubscriberRow> = sqlx::query_as(
            "SELECT id, email, subscribed_at FROM newsletter_subscribers \
             ORDER BY subscribed_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list subscribers", e))?;

        Ok(rows
            .into_iter()
            .map(|row| NewsletterSubscriber {
                id: row.id,
                email: row.email,
                subscribed_at: row.subscribed_at,
            })
            .collect())
    }
}
