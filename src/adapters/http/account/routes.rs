//! Route table for account endpoints.

use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers::{
    delete_account, get_profile, login, reset_password, signup, update_profile, AccountAppState,
};

/// Account routes, mounted at `/api/auth`.
///
/// - `POST /signup` - create an account, returns a token
/// - `POST /login` - email/password sign-in, returns a token
/// - `POST /reset-password` - email a password-reset link
/// - `GET /profile/:uid` - the caller's profile
/// - `PUT /profile/:uid` - update display name / photo
/// - `DELETE /profile/:uid` - delete the account
pub fn account_router() -> Router<AccountAppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/reset-password", post(reset_password))
        .route("/profile/:uid", get(get_profile))
        .route("/profile/:uid", put(update_profile))
        .route("/profile/:uid", delete(delete_account))
}
