//! Route table for community endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{
    submit_collaboration, submit_contact, subscribe_newsletter, CommunityAppState,
};

/// Community routes, mounted at `/api`.
///
/// - `POST /contact` - submit a contact form question
/// - `POST /collaboration` - submit a collaboration enquiry
/// - `POST /newsletter/subscribe` - join the newsletter
pub fn community_router() -> Router<CommunityAppState> {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/collaboration", post(submit_collaboration))
        .route("/newsletter/subscribe", post(subscribe_newsletter))
}
