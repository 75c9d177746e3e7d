//! ProfileHandler - read, update, and delete the caller's own account.

use std::sync::Arc;

use crate::domain::account::{AccountError, ProfileUpdate, UserProfile};
use crate::domain::foundation::UserId;
use crate::ports::{ProfileStore, UserDirectory};

use super::map_directory_err;

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub caller: UserId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub caller: UserId,
    pub user_id: UserId,
    pub update: ProfileUpdate,
}

#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub caller: UserId,
    pub user_id: UserId,
}

/// Self-service profile operations. Every operation requires the path user
/// id to match the authenticated caller.
pub struct ProfileHandler {
    directory: Arc<dyn UserDirectory>,
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileHandler {
    pub fn new(directory: Arc<dyn UserDirectory>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            directory,
            profiles,
        }
    }

    pub async fn get(&self, query: GetProfileQuery) -> Result<UserProfile, AccountError> {
        Self::require_self(&query.caller, &query.user_id)?;
        self.profiles
            .get(&query.user_id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    pub async fn update(&self, cmd: UpdateProfileCommand) -> Result<UserProfile, AccountError> {
        Self::require_self(&cmd.caller, &cmd.user_id)?;
        if cmd.update.display_name.is_none() && cmd.update.photo_url.is_none() {
            return Err(AccountError::validation("No fields to update"));
        }

        // Provider first, so a provider rejection leaves the local row
        // untouched.
        self.directory
            .update_user(
                &cmd.user_id,
                cmd.update.display_name.clone(),
                cmd.update.photo_url.clone(),
            )
            .await
            .map_err(map_directory_err)?;
        self.profiles.update(&cmd.user_id, &cmd.update).await?;

        tracing::info!(user_id = %cmd.user_id, "profile updated");
        self.profiles
            .get(&cmd.user_id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    pub async fn delete(&self, cmd: DeleteAccountCommand) -> Result<(), AccountError> {
        Self::require_self(&cmd.caller, &cmd.user_id)?;

        self.directory
            .delete_user(&cmd.user_id)
            .await
            .map_err(map_directory_err)?;
        self.profiles.delete(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, "account deleted");
        Ok(())
    }

    fn require_self(caller: &UserId, user_id: &UserId) -> Result<(), AccountError> {
        if caller != user_id {
            return Err(AccountError::Forbidden);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::domain::billing::MembershipActivation;
    use crate::domain::foundation::{AuthError, CallerIdentity, DomainError};
    use crate::ports::{DirectoryError, DirectoryUser, NewDirectoryUser};

    #[derive(Default)]
    struct PermissiveDirectory {
        deleted: Mutex<Vec<UserId>>,
    }

    #[async_trait]
    impl UserDirectory for PermissiveDirectory {
        async fn verify_token(&self, _token: &str) -> Result<CallerIdentity, AuthError> {
            Err(AuthError::InvalidCredential)
        }

        async fn sign_in(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<DirectoryUser, DirectoryError> {
            Err(DirectoryError::InvalidCredentials)
        }

        async fn lookup_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<DirectoryUser>, DirectoryError> {
            Ok(None)
        }

        async fn create_user(
            &self,
            _new_user: NewDirectoryUser,
        ) -> Result<DirectoryUser, DirectoryError> {
            Err(DirectoryError::rejected("not supported"))
        }

        async fn get_user(&self, _uid: &UserId) -> Result<Option<DirectoryUser>, DirectoryError> {
            Ok(None)
        }

        async fn update_user(
            &self,
            uid: &UserId,
            display_name: Option<String>,
            _photo_url: Option<String>,
        ) -> Result<DirectoryUser, DirectoryError> {
            Ok(DirectoryUser {
                uid: uid.clone(),
                email: "x@example.com".to_string(),
                display_name,
                email_verified: true,
            })
        }

        async fn delete_user(&self, uid: &UserId) -> Result<(), DirectoryError> {
            self.deleted.lock().unwrap().push(uid.clone());
            Ok(())
        }

        async fn email_verification_link(&self, _email: &str) -> Result<String, DirectoryError> {
            Ok(String::new())
        }

        async fn password_reset_link(&self, _email: &str) -> Result<String, DirectoryError> {
            Ok(String::new())
        }
    }

    #[derive(Default)]
    struct MapProfiles {
        rows: Mutex<HashMap<String, UserProfile>>,
    }

    #[async_trait]
    impl ProfileStore for MapProfiles {
        async fn insert(&self, profile: &UserProfile) -> Result<(), DomainError> {
            self.rows
                .lock()
                .unwrap()
                .insert(profile.user_id.as_str().to_string(), profile.clone());
            Ok(())
        }

        async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
            Ok(self.rows.lock().unwrap().get(user_id.as_str()).cloned())
        }

        async fn update(
            &self,
            user_id: &UserId,
            update: &ProfileUpdate,
        ) -> Result<(), DomainError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(profile) = rows.get_mut(user_id.as_str()) {
                if let Some(name) = &update.display_name {
                    profile.display_name = Some(name.clone());
                }
                if let Some(url) = &update.photo_url {
                    profile.photo_url = Some(url.clone());
                }
            }
            Ok(())
        }

        async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
            self.rows.lock().unwrap().remove(user_id.as_str());
            Ok(())
        }

        async fn activate_membership(
            &self,
            _activation: &MembershipActivation,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    async fn handler_with_alice() -> (ProfileHandler, Arc<MapProfiles>) {
        let profiles = Arc::new(MapProfiles::default());
        profiles
            .insert(&UserProfile::new(
                uid("uid-alice"),
                "alice@example.com",
                Some("Alice".to_string()),
                Utc::now(),
            ))
            .await
            .unwrap();
        let handler = ProfileHandler::new(Arc::new(PermissiveDirectory::default()), profiles.clone());
        (handler, profiles)
    }

    #[tokio::test]
    async fn get_own_profile_succeeds() {
        let (handler, _) = handler_with_alice().await;
        let profile = handler
            .get(GetProfileQuery {
                caller: uid("uid-alice"),
                user_id: uid("uid-alice"),
            })
            .await
            .unwrap();
        assert_eq!(profile.email, "alice@example.com");
    }

    #[tokio::test]
    async fn acting_on_another_account_is_forbidden() {
        let (handler, profiles) = handler_with_alice().await;

        let err = handler
            .get(GetProfileQuery {
                caller: uid("uid-bob"),
                user_id: uid("uid-alice"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Forbidden));

        let err = handler
            .delete(DeleteAccountCommand {
                caller: uid("uid-bob"),
                user_id: uid("uid-alice"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Forbidden));
        assert!(profiles.rows.lock().unwrap().contains_key("uid-alice"));
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let (handler, _) = handler_with_alice().await;
        let profile = handler
            .update(UpdateProfileCommand {
                caller: uid("uid-alice"),
                user_id: uid("uid-alice"),
                update: ProfileUpdate {
                    display_name: Some("Alicia".to_string()),
                    photo_url: None,
                },
            })
            .await
            .unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Alicia"));
        assert!(profile.photo_url.is_none());
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let (handler, _) = handler_with_alice().await;
        let err = handler
            .update(UpdateProfileCommand {
                caller: uid("uid-alice"),
                user_id: uid("uid-alice"),
                update: ProfileUpdate::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_removes_both_provider_and_local_rows() {
        let (handler, profiles) = handler_with_alice().await;
        handler
            .delete(DeleteAccountCommand {
                caller: uid("uid-alice"),
                user_id: uid("uid-alice"),
            })
            .await
            .unwrap();
        assert!(profiles.rows.lock().unwrap().is_empty());
    }
}
