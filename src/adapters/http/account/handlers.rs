//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::account::{
    DeleteAccountCommand, GetProfileQuery, LoginCommand, LoginHandler, PasswordResetCommand,
    PasswordResetHandler, ProfileHandler, SignupCommand, SignupHandler, UpdateProfileCommand,
};
use crate::domain::account::ProfileUpdate;
use crate::domain::foundation::{ErrorCode, UserId};
use crate::ports::{Mailer, ProfileStore, TokenIssuer, UserDirectory};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::dto::{
    AuthResponse, LoginRequest, MessageResponse, ProfileResponse, ResetPasswordRequest,
    SignupRequest, UpdateProfileRequest,
};

/// Shared state for account endpoints.
#[derive(Clone)]
pub struct AccountAppState {
    pub directory: Arc<dyn UserDirectory>,
    pub profiles: Arc<dyn ProfileStore>,
    pub mailer: Arc<dyn Mailer>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl AccountAppState {
    fn signup_handler(&self) -> SignupHandler {
        SignupHandler::new(
            self.directory.clone(),
            self.profiles.clone(),
            self.mailer.clone(),
            self.tokens.clone(),
        )
    }

    fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.directory.clone(), self.profiles.clone(), self.tokens.clone())
    }

    fn profile_handler(&self) -> ProfileHandler {
        ProfileHandler::new(self.directory.clone(), self.profiles.clone())
    }

    fn password_reset_handler(&self) -> PasswordResetHandler {
        PasswordResetHandler::new(self.directory.clone(), self.mailer.clone())
    }
}

fn parse_uid(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw)
        .map_err(|_| ApiError::new(ErrorCode::ValidationFailed, "User id must not be empty"))
}

pub async fn signup(
    State(state): State<AccountAppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .signup_handler()
        .handle(SignupCommand {
            email: body.email,
            password: body.password,
            display_name: body.display_name,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: result.token,
            profile: Some(ProfileResponse::from(result.profile)),
        }),
    ))
}

pub async fn login(
    State(state): State<AccountAppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(AuthResponse {
        token: result.token,
        profile: result.profile.map(ProfileResponse::from),
    }))
}

pub async fn reset_password(
    State(state): State<AccountAppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .password_reset_handler()
        .handle(PasswordResetCommand { email: body.email })
        .await?;
    // Same response whether or not the account exists.
    Ok(Json(MessageResponse {
        message: "If the account exists, a reset link has been sent",
    }))
}

pub async fn get_profile(
    State(state): State<AccountAppState>,
    RequireAuth(caller): RequireAuth,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .profile_handler()
        .get(GetProfileQuery {
            caller: caller.subject,
            user_id: parse_uid(&uid)?,
        })
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}

pub async fn update_profile(
    State(state): State<AccountAppState>,
    RequireAuth(caller): RequireAuth,
    Path(uid): Path<String>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .profile_handler()
        .update(UpdateProfileCommand {
            caller: caller.subject,
            user_id: parse_uid(&uid)?,
            update: ProfileUpdate {
                display_name: body.display_name,
                photo_url: body.photo_url,
            },
        })
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}

pub async fn delete_account(
    State(state): State<AccountAppState>,
    RequireAuth(caller): RequireAuth,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .profile_handler()
        .delete(DeleteAccountCommand {
            caller: caller.subject,
            user_id: parse_uid(&uid)?,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
