//! Community entities: contact queries, collaboration enquiries, and
//! newsletter subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::UserId;

/// A question submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactQuery {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A collaboration enquiry. The submitter may be anonymous, so the caller
/// is attached only when the request carried a valid credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationEnquiry {
    pub id: Uuid,
    pub email: String,
    pub user_id: Option<UserId>,
    pub status: String,
    pub enquiry_date: DateTime<Utc>,
}

/// A newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: Uuid,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}
