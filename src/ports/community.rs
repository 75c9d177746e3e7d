//! Community persistence ports: contact queries, collaboration enquiries,
//! and newsletter subscriptions.

use async_trait::async_trait;

use crate::domain::community::{CollaborationEnquiry, ContactQuery, NewsletterSubscriber};
use crate::domain::foundation::DomainError;

/// Store for contact form submissions.
#[async_trait]
pub trait ContactInbox: Send + Sync {
    async fn submit(&self, query: &ContactQuery) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<ContactQuery>, DomainError>;
}

/// Store for collaboration enquiries.
#[async_trait]
pub trait CollaborationInbox: Send + Sync {
    async fn submit(&self, enquiry: &CollaborationEnquiry) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<CollaborationEnquiry>, DomainError>;
}

/// Store for newsletter subscriptions.
#[async_trait]
pub trait NewsletterList: Send + Sync {
    async fn subscribe(&self, subscriber: &NewsletterSubscriber) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<NewsletterSubscriber>, DomainError>;
}
