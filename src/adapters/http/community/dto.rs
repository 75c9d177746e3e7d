//! Request/response bodies for community endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CollaborationRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubmittedResponse {
    pub id: String,
    pub message: &'static str,
}
