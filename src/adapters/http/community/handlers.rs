//! HTTP handlers for community endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::validate_email;
use crate::domain::community::{CollaborationEnquiry, ContactQuery, NewsletterSubscriber};
use crate::domain::foundation::ErrorCode;
use crate::ports::{CollaborationInbox, ContactInbox, NewsletterList};

use super::super::error::ApiError;
use super::super::middleware::OptionalAuth;
use super::dto::{CollaborationRequest, ContactRequest, NewsletterRequest, SubmittedResponse};

/// Shared state for community endpoints.
#[derive(Clone)]
pub struct CommunityAppState {
    pub contact: Arc<dyn ContactInbox>,
    pub collaboration: Arc<dyn CollaborationInbox>,
    pub newsletter: Arc<dyn NewsletterList>,
}

pub async fn submit_contact(
    State(state): State<CommunityAppState>,
    Json(body): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.name.trim().is_empty() || body.message.trim().is_empty() {
        return Err(ApiError::new(
            ErrorCode::ValidationFailed,
            "Name and message are required",
        ));
    }
    validate_email(&body.email)?;

    let query = ContactQuery {
        id: Uuid::new_v4(),
        name: body.name,
        email: body.email,
        subject: body.subject,
        message: body.message,
        status: "new".to_string(),
        created_at: Utc::now(),
    };
    state.contact.submit(&query).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            id: query.id.to_string(),
            message: "Query submitted",
        }),
    ))
}

pub async fn submit_collaboration(
    State(state): State<CommunityAppState>,
    OptionalAuth(caller): OptionalAuth,
    Json(body): Json<CollaborationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_email(&body.email)?;

    let enquiry = CollaborationEnquiry {
        id: Uuid::new_v4(),
        email: body.email,
        user_id: caller.map(|c| c.subject),
        status: "pending".to_string(),
        enquiry_date: Utc::now(),
    };
    state.collaboration.submit(&enquiry).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            id: enquiry.id.to_string(),
            message: "Enquiry submitted",
        }),
    ))
}

pub async fn subscribe_newsletter(
    State(state): State<CommunityAppState>,
    Json(body): Json<NewsletterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_email(&body.email)?;

    let subscriber = NewsletterSubscriber {
        id: Uuid::new_v4(),
        email: body.email,
        subscribed_at: Utc::now(),
    };
    state.newsletter.subscribe(&subscriber).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            id: subscriber.id.to_string(),
            message: "Subscribed",
        }),
    ))
}
