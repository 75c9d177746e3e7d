//! REST adapter for the managed identity provider.
//!
//! Implements `UserDirectory` against the provider's account-management API.
//! All calls go to `{base_url}/v1/accounts:{action}?key={api_key}` with JSON
//! bodies, mirroring the toolkit-style API the provider exposes.
//!
//! # Error translation
//!
//! The provider reports failures as HTTP 400 with a machine-readable code in
//! the body. Credential problems map to `DirectoryError::InvalidCredentials`,
//! throttling to `TooManyAttempts`, everything else the caller could fix to
//! `Rejected`, and transport failures to `Unavailable`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::foundation::{AuthError, CallerIdentity, UserId};
use crate::ports::{DirectoryError, DirectoryUser, NewDirectoryUser, UserDirectory};

/// Identity provider connection settings.
#[derive(Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub api_key: SecretString,
}

/// `UserDirectory` backed by the provider's REST API.
pub struct RestIdentityDirectory {
    config: IdentityConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AccountRecord {
    #[serde(rename = "localId")]
    local_id: String,
    email: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    #[serde(rename = "emailVerified", default)]
    email_verified: bool,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountRecord>,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct OobLinkResponse {
    #[serde(rename = "oobLink")]
    oob_link: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
struct OobCodeRequest<'a> {
    #[serde(rename = "requestType")]
    request_type: &'a str,
    email: &'a str,
    #[serde(rename = "returnOobLink")]
    return_oob_link: bool,
}

impl RestIdentityDirectory {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.config.base_url.trim_end_matches('/'),
            action,
            self.config.api_key.expose_secret()
        )
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<T, DirectoryError> {
        let response = self
            .http
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await
            .map_err(|e| DirectoryError::unavailable(e.to_string()))?;

        if response.status().is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| DirectoryError::unavailable(format!("malformed response: {e}")));
        }

        let code = response
            .json::<ProviderErrorBody>()
            .await
            .map(|b| b.error.message)
            .unwrap_or_default();
        Err(translate_provider_code(&code))
    }
}

/// Map a provider error code to the directory taxonomy. Codes are the
/// provider's stable machine-readable identifiers, sometimes suffixed with
/// detail text, so matching is on the prefix.
fn translate_provider_code(code: &str) -> DirectoryError {
    let base = code.split(|c: char| c == ' ' || c == ':').next().unwrap_or("");
    match base {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
        | "USER_DISABLED" => DirectoryError::InvalidCredentials,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => DirectoryError::TooManyAttempts,
        "EMAIL_EXISTS" => DirectoryError::rejected("Email already registered"),
        "WEAK_PASSWORD" => DirectoryError::rejected("Password is too weak"),
        "INVALID_EMAIL" => DirectoryError::rejected("Invalid email address"),
        "" => DirectoryError::unavailable("provider returned an unreadable error"),
        other => DirectoryError::rejected(other.to_string()),
    }
}

#[async_trait]
impl UserDirectory for RestIdentityDirectory {
    async fn verify_token(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        let result: Result<LookupResponse, DirectoryError> =
            self.post("lookup", json!({ "idToken": token })).await;

        match result {
            Ok(body) => {
                let record = body
                    .users
                    .into_iter()
                    .next()
                    .ok_or(AuthError::InvalidCredential)?;
                let subject =
                    UserId::new(record.local_id).map_err(|_| AuthError::InvalidCredential)?;
                Ok(CallerIdentity::new(subject))
            }
            Err(DirectoryError::Unavailable(msg)) => Err(AuthError::service_unavailable(msg)),
            Err(_) => Err(AuthError::InvalidCredential),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<DirectoryUser, DirectoryError> {
        let body: SignInResponse = self
            .post(
                "signInWithPassword",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        Ok(DirectoryUser {
            uid: UserId::new(body.local_id)
                .map_err(|e| DirectoryError::unavailable(format!("bad uid from provider: {e}")))?,
            email: body.email,
            display_name: body.display_name,
            email_verified: false,
        })
    }

    async fn lookup_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, DirectoryError> {
        let result: Result<LookupResponse, DirectoryError> =
            self.post("lookup", json!({ "email": [email] })).await;

        let body = match result {
            Ok(body) => body,
            // The provider reports an unknown email as an error rather than
            // an empty list.
            Err(DirectoryError::InvalidCredentials) => return Ok(None),
            Err(err) => return Err(err),
        };

        body.users.into_iter().next().map(to_directory_user).transpose()
    }

    async fn create_user(
        &self,
        new_user: NewDirectoryUser,
    ) -> Result<DirectoryUser, DirectoryError> {
        let body: SignUpResponse = self
            .post(
                "signUp",
                json!({
                    "email": new_user.email,
                    "password": new_user.password,
                    "displayName": new_user.display_name,
                    "returnSecureToken": false,
                }),
            )
            .await?;

        Ok(DirectoryUser {
            uid: UserId::new(body.local_id)
                .map_err(|e| DirectoryError::unavailable(format!("bad uid from provider: {e}")))?,
            email: body.email,
            display_name: new_user.display_name,
            email_verified: false,
        })
    }

    async fn get_user(&self, uid: &UserId) -> Result<Option<DirectoryUser>, DirectoryError> {
        let result: Result<LookupResponse, DirectoryError> = self
            .post("lookup", json!({ "localId": [uid.as_str()] }))
            .await;

        let body = match result {
            Ok(body) => body,
            Err(DirectoryError::InvalidCredentials) => return Ok(None),
            Err(err) => return Err(err),
        };

        body.users.into_iter().next().map(to_directory_user).transpose()
    }

    async fn update_user(
        &self,
        uid: &UserId,
        display_name: Option<String>,
        photo_url: Option<String>,
    ) -> Result<DirectoryUser, DirectoryError> {
        let mut body = json!({ "localId": uid.as_str() });
        if let Some(name) = &display_name {
            body["displayName"] = json!(name);
        }
        if let Some(url) = &photo_url {
            body["photoUrl"] = json!(url);
        }

        let record: AccountRecord = self.post("update", body).await?;
        to_directory_user(record)
    }

    async fn delete_user(&self, uid: &UserId) -> Result<(), DirectoryError> {
        let _: serde_json::Value = self
            .post("delete", json!({ "localId": uid.as_str() }))
            .await?;
        Ok(())
    }

    async fn email_verification_link(&self, email: &str) -> Result<String, DirectoryError> {
        let body: OobLinkResponse = self
            .post(
                "sendOobCode",
                serde_json::to_value(OobCodeRequest {
                    request_type: "VERIFY_EMAIL",
                    email,
                    return_oob_link: true,
                })
                .map_err(|e| DirectoryError::unavailable(e.to_string()))?,
            )
            .await?;
        Ok(body.oob_link)
    }

    async fn password_reset_link(&self, email: &str) -> Result<String, DirectoryError> {
        let body: OobLinkResponse = self
            .post(
                "sendOobCode",
                serde_json::to_value(OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                    return_oob_link: true,
                })
                .map_err(|e| DirectoryError::unavailable(e.to_string()))?,
            )
            .await?;
        Ok(body.oob_link)
    }
}

fn to_directory_user(record: AccountRecord) -> Result<DirectoryUser, DirectoryError> {
    Ok(DirectoryUser {
        uid: UserId::new(record.local_id)
            .map_err(|e| DirectoryError::unavailable(format!("bad uid from provider: {e}")))?,
        email: record.email.unwrap_or_default(),
        display_name: record.display_name,
        email_verified: record.email_verified,
    })
}
