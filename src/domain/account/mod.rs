//! Account domain: user profiles and membership state as stored locally.
//!
//! The identity provider owns credentials; this module owns the profile
//! document persisted alongside it, including the membership fields the
//! payment reconciler activates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::billing::PlanType;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Membership status on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    None,
    Active,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::None => "none",
            MembershipStatus::Active => "active",
        }
    }
}

/// Locally stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
    pub membership_status: MembershipStatus,
    pub plan_type: Option<PlanType>,
    /// Amount paid in minor units, set on membership activation.
    pub amount_paid: Option<i64>,
    pub currency: Option<String>,
    pub subscription_start: Option<DateTime<Utc>>,
    pub last_payment: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile for a newly signed-up user, with no membership.
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            display_name,
            photo_url: None,
            email_verified: false,
            membership_status: MembershipStatus::None,
            plan_type: None,
            amount_paid: None,
            currency: None,
            subscription_start: None,
            last_payment: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Mutable profile fields a user may update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Errors from account flows.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    /// Missing or invalid request fields, including duplicate signup email.
    #[error("{0}")]
    Validation(String),

    /// Email/password pair rejected at login.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Caller tried to act on another user's account.
    #[error("You may only act on your own account")]
    Forbidden,

    /// No such user.
    #[error("User not found")]
    NotFound,

    /// The identity provider failed in a way the caller cannot fix.
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Storage failure.
    #[error("Storage error: {0}")]
    Database(String),
}

impl AccountError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Error code used by the HTTP boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::Validation(_) => ErrorCode::ValidationFailed,
            AccountError::InvalidCredentials => ErrorCode::InvalidCredential,
            AccountError::Forbidden => ErrorCode::Forbidden,
            AccountError::NotFound => ErrorCode::NotFound,
            AccountError::Provider(_) => ErrorCode::InternalError,
            AccountError::Database(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DatabaseError => AccountError::Database(err.message),
            ErrorCode::ValidationFailed => AccountError::Validation(err.message),
            _ => AccountError::Database(format!("{}: {}", err.code, err.message)),
        }
    }
}

/// Minimal email shape check before asking the provider to create a user.
///
/// The provider performs its own validation; this only rejects obviously
/// broken input early with a clear message.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::validation("Invalid email format"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(DomainError::validation("Invalid email format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_has_no_membership() {
        let profile = UserProfile::new(
            UserId::new("uid-1").unwrap(),
            "a@b.com",
            Some("Alice".to_string()),
            Utc::now(),
        );
        assert_eq!(profile.membership_status, MembershipStatus::None);
        assert!(profile.plan_type.is_none());
        assert!(!profile.email_verified);
    }

    #[test]
    fn email_validation_accepts_plausible_addresses() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.domain.org").is_ok());
    }

    #[test]
    fn email_validation_rejects_broken_input() {
        for bad in ["", "no-at-sign", "@example.com", "user@", "user@nodot"] {
            assert!(validate_email(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
