//! Local user profile persistence port.

use async_trait::async_trait;

use crate::domain::account::{ProfileUpdate, UserProfile};
use crate::domain::billing::MembershipActivation;
use crate::domain::foundation::{DomainError, UserId};

/// Store for locally persisted user profiles, including membership state.
///
/// # Contract
///
/// `activate_membership` is an upsert keyed by user id with last-writer-wins
/// semantics (no concurrency token on the profile row); repeating the same
/// activation leaves the profile equivalent to a single call.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a fresh profile at signup.
    async fn insert(&self, profile: &UserProfile) -> Result<(), DomainError>;

    /// Fetch a profile by user id.
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Apply a profile update; no-op fields are left untouched.
    async fn update(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DomainError>;

    /// Delete the profile row.
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Upsert membership fields to active with the given snapshot.
    async fn activate_membership(
        &self,
        activation: &MembershipActivation,
    ) -> Result<(), DomainError>;
}
