//! Integration tests for account, catalog, and community HTTP endpoints.
//!
//! Uses a fake identity provider and in-memory stores behind the real
//! router, so signup/login, profile authorization, catalog CRUD, and the
//! community forms are exercised end to end.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

use coursekit::adapters::auth::{ChainTokenVerifier, ProviderTokenVerifier};
use coursekit::adapters::http::{
    api_router, AccountAppState, BillingAppState, CatalogAppState, CommunityAppState,
};
use coursekit::domain::account::{ProfileUpdate, UserProfile};
use coursekit::domain::billing::{
    CallbackSigner, MembershipActivation, Order, OrderStatus, PurchaseRecord,
};
use coursekit::domain::catalog::Course;
use coursekit::domain::community::{CollaborationEnquiry, ContactQuery, NewsletterSubscriber};
use coursekit::domain::foundation::{AuthError, CallerIdentity, DomainError, OrderId, UserId};
use coursekit::ports::{
    CollaborationInbox, ContactInbox, CourseCatalog, DirectoryError, DirectoryUser, EmailMessage,
    GatewayOrder, GatewayOrderRequest, Mailer, MailerError, NewDirectoryUser, NewsletterList,
    OrderRepository, PaymentGateway, PaymentGatewayError, ProfileStore, PurchaseLedger,
    TokenIssuer, TokenVerifier, UserDirectory,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Fake identity provider: stores users, accepts `provider-tok-<uid>` tokens.
#[derive(Default)]
struct FakeDirectory {
    users: Mutex<Vec<(DirectoryUser, String)>>,
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn verify_token(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        match token.strip_prefix("provider-tok-") {
            Some(uid) if !uid.is_empty() => Ok(CallerIdentity::new(
                UserId::new(uid).map_err(|_| AuthError::InvalidCredential)?,
            )),
            _ => Err(AuthError::InvalidCredential),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<DirectoryUser, DirectoryError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone())
            .ok_or(DirectoryError::InvalidCredentials)
    }

    async fn lookup_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, DirectoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn create_user(
        &self,
        new_user: NewDirectoryUser,
    ) -> Result<DirectoryUser, DirectoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.email == new_user.email) {
            return Err(DirectoryError::rejected("Email already registered"));
        }
        let user = DirectoryUser {
            uid: UserId::new(format!("uid-{}", users.len() + 1)).unwrap(),
            email: new_user.email,
            display_name: new_user.display_name,
            email_verified: false,
        };
        users.push((user.clone(), new_user.password));
        Ok(user)
    }

    async fn get_user(&self, uid: &UserId) -> Result<Option<DirectoryUser>, DirectoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| &u.uid == uid)
            .map(|(u, _)| u.clone()))
    }

    async fn update_user(
        &self,
        uid: &UserId,
        display_name: Option<String>,
        _photo_url: Option<String>,
    ) -> Result<DirectoryUser, DirectoryError> {
        let mut users = self.users.lock().unwrap();
        let entry = users
            .iter_mut()
            .find(|(u, _)| &u.uid == uid)
            .ok_or_else(|| DirectoryError::rejected("No such user"))?;
        if let Some(name) = display_name {
            entry.0.display_name = Some(name);
        }
        Ok(entry.0.clone())
    }

    async fn delete_user(&self, uid: &UserId) -> Result<(), DirectoryError> {
        self.users.lock().unwrap().retain(|(u, _)| &u.uid != uid);
        Ok(())
    }

    async fn email_verification_link(&self, email: &str) -> Result<String, DirectoryError> {
        Ok(format!("https://id.test/verify?email={email}"))
    }

    async fn password_reset_link(&self, email: &str) -> Result<String, DirectoryError> {
        if self.lookup_by_email(email).await?.is_some() {
            Ok(format!("https://id.test/reset?email={email}"))
        } else {
            Err(DirectoryError::rejected("No such user"))
        }
    }
}

/// Issues `provider-tok-<uid>` so issued tokens round-trip through the
/// directory's own verifier.
struct EchoIssuer;

impl TokenIssuer for EchoIssuer {
    fn issue(&self, subject: &UserId) -> Result<String, AuthError> {
        Ok(format!("provider-tok-{subject}"))
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

    async fn update(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DomainError> {
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

#[derive(Default)]
struct MapCatalog {
    courses: Mutex<Vec<Course>>,
}

#[async_trait]
impl CourseCatalog for MapCatalog {
    async fn list(&self) -> Result<Vec<Course>, DomainError> {
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Course>, DomainError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Course>, DomainError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }

    async fn insert(&self, course: &Course) -> Result<(), DomainError> {
        self.courses.lock().unwrap().push(course.clone());
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<bool, DomainError> {
        let mut courses = self.courses.lock().unwrap();
        match courses.iter_mut().find(|c| c.id == course.id) {
            Some(existing) => {
                *existing = course.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| &c.id != id);
        Ok(courses.len() < before)
    }
}

#[derive(Default)]
struct RecordingCommunity {
    contacts: Mutex<Vec<ContactQuery>>,
    collaborations: Mutex<Vec<CollaborationEnquiry>>,
    subscribers: Mutex<Vec<NewsletterSubscriber>>,
}

#[async_trait]
impl ContactInbox for RecordingCommunity {
    async fn submit(&self, query: &ContactQuery) -> Result<(), DomainError> {
        self.contacts.lock().unwrap().push(query.clone());
        Ok(())
    }
    async fn list(&self) -> Result<Vec<ContactQuery>, DomainError> {
        Ok(self.contacts.lock().unwrap().clone())
    }
}

#[async_trait]
impl CollaborationInbox for RecordingCommunity {
    async fn submit(&self, enquiry: &CollaborationEnquiry) -> Result<(), DomainError> {
        self.collaborations.lock().unwrap().push(enquiry.clone());
        Ok(())
    }
    async fn list(&self) -> Result<Vec<CollaborationEnquiry>, DomainError> {
        Ok(self.collaborations.lock().unwrap().clone())
    }
}

#[async_trait]
impl NewsletterList for RecordingCommunity {
    async fn subscribe(&self, subscriber: &NewsletterSubscriber) -> Result<(), DomainError> {
        let mut subscribers = self.subscribers.lock().unwrap();
        if !subscribers.iter().any(|s| s.email == subscriber.email) {
            subscribers.push(subscriber.clone());
        }
        Ok(())
    }
    async fn list(&self) -> Result<Vec<NewsletterSubscriber>, DomainError> {
        Ok(self.subscribers.lock().unwrap().clone())
    }
}

struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, _message: EmailMessage) -> Result<(), MailerError> {
        Ok(())
    }
}

// Billing stand-ins; this test never touches payment routes.

struct NullOrders;

#[async_trait]
impl OrderRepository for NullOrders {
    async fn create(&self, _order: &Order) -> Result<(), DomainError> {
        Ok(())
    }
    async fn attach_external_id(&self, _id: &OrderId, _e: &str) -> Result<(), DomainError> {
        Ok(())
    }
    async fn find_by_external_id_for_user(
        &self,
        _e: &str,
        _u: &UserId,
    ) -> Result<Option<Order>, DomainError> {
        Ok(None)
    }
    async fn transition_if_pending(
        &self,
        _id: &OrderId,
        _s: OrderStatus,
        _p: Option<&str>,
        _sig: Option<&str>,
        _t: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        Ok(false)
    }
}

struct NullLedger;

#[async_trait]
impl PurchaseLedger for NullLedger {
    async fn append_once(&self, _record: &PurchaseRecord) -> Result<bool, DomainError> {
        Ok(false)
    }
    async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<PurchaseRecord>, DomainError> {
        Ok(Vec::new())
    }
}

struct NullGateway;

#[async_trait]
impl PaymentGateway for NullGateway {
    async fn create_order(
        &self,
        _request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        Err(PaymentGatewayError::Rejected("unused".to_string()))
    }
    fn key_id(&self) -> &str {
        "rzp_unused"
    }
}

struct TestApp {
    router: Router,
    community: Arc<RecordingCommunity>,
}

fn test_app() -> TestApp {
    let directory = Arc::new(FakeDirectory::default());
    let profiles = Arc::new(MapProfiles::default());
    let community = Arc::new(RecordingCommunity::default());

    let provider = Arc::new(ProviderTokenVerifier::new(directory.clone()))
        as Arc<dyn TokenVerifier>;
    let verifier: Arc<dyn TokenVerifier> = Arc::new(ChainTokenVerifier::new(vec![provider]));

    let account = AccountAppState {
        directory,
        profiles: profiles.clone(),
        mailer: Arc::new(NullMailer),
        tokens: Arc::new(EchoIssuer),
    };
    let billing = BillingAppState {
        orders: Arc::new(NullOrders),
        purchases: Arc::new(NullLedger),
        profiles,
        gateway: Arc::new(NullGateway),
        signer: Arc::new(CallbackSigner::new(SecretString::new("unused".to_string()))),
        currency: "INR".to_string(),
    };
    let catalog = CatalogAppState {
        catalog: Arc::new(MapCatalog::default()),
    };
    let community_state = CommunityAppState {
        contact: community.clone(),
        collaboration: community.clone(),
        newsletter: community.clone(),
    };

    TestApp {
        router: api_router(verifier, account, billing, catalog, community_state),
        community,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn signup(app: &TestApp, email: &str) -> (StatusCode, Value) {
    send(
        &app.router,
        post_json(
            "/api/auth/signup",
            None,
            json!({ "email": email, "password": "s3cret99", "displayName": "Alice" }),
        ),
    )
    .await
}

// =============================================================================
// Account
// =============================================================================

#[tokio::test]
async fn signup_returns_token_and_profile() {
    let app = test_app();
    let (status, body) = signup(&app, "alice@example.com").await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].as_str().unwrap().starts_with("provider-tok-"));
    assert_eq!(body["profile"]["email"], "alice@example.com");
    assert_eq!(body["profile"]["membershipStatus"], "none");
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = test_app();
    signup(&app, "alice@example.com").await;
    let (status, body) = signup(&app, "alice@example.com").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let app = test_app();
    signup(&app, "alice@example.com").await;

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": "s3cret99" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().unwrap().starts_with("provider-tok-"));
    assert_eq!(body["profile"]["email"], "alice@example.com");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app();
    signup(&app, "alice@example.com").await;

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": "wrong" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn profile_round_trip_with_issued_token() {
    let app = test_app();
    let (_, body) = signup(&app, "alice@example.com").await;
    let token = body["token"].as_str().unwrap().to_string();
    let uid = body["profile"]["userId"].as_str().unwrap().to_string();

    let (status, profile) = send(
        &app.router,
        get(&format!("/api/auth/profile/{uid}"), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["displayName"], "Alice");

    // Update, then read back.
    let (status, updated) = send(
        &app.router,
        Request::builder()
            .method("PUT")
            .uri(format!("/api/auth/profile/{uid}"))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(json!({ "displayName": "Alicia" }).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["displayName"], "Alicia");
}

#[tokio::test]
async fn profile_of_another_user_is_forbidden() {
    let app = test_app();
    let (_, alice) = signup(&app, "alice@example.com").await;
    let (_, bob) = signup(&app, "bob@example.com").await;
    let alice_uid = alice["profile"]["userId"].as_str().unwrap().to_string();
    let bob_token = bob["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app.router,
        get(&format!("/api/auth/profile/{alice_uid}"), Some(&bob_token)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn deleted_account_profile_is_gone() {
    let app = test_app();
    let (_, body) = signup(&app, "alice@example.com").await;
    let token = body["token"].as_str().unwrap().to_string();
    let uid = body["profile"]["userId"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app.router,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/auth/profile/{uid}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app.router,
        get(&format!("/api/auth/profile/{uid}"), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn password_reset_response_does_not_reveal_account_existence() {
    let app = test_app();
    signup(&app, "alice@example.com").await;

    let (known, known_body) = send(
        &app.router,
        post_json("/api/auth/reset-password", None, json!({ "email": "alice@example.com" })),
    )
    .await;
    let (unknown, unknown_body) = send(
        &app.router,
        post_json("/api/auth/reset-password", None, json!({ "email": "nobody@example.com" })),
    )
    .await;

    assert_eq!(known, StatusCode::OK);
    assert_eq!(unknown, StatusCode::OK);
    assert_eq!(known_body, unknown_body);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn course_crud_round_trip() {
    let app = test_app();
    let (_, body) = signup(&app, "alice@example.com").await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, created) = send(
        &app.router,
        post_json(
            "/api/courses",
            Some(&token),
            json!({ "title": "Intro to Trading!", "category": "finance" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "intro-to-trading");
    let id = created["id"].as_str().unwrap().to_string();

    // Public read, no token.
    let (status, listed) = send(&app.router, get("/api/courses?category=finance", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["courses"].as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app.router, get(&format!("/api/courses/{id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Intro to Trading!");

    // Writes require a credential.
    let (status, _) = send(
        &app.router,
        post_json("/api/courses", None, json!({ "title": "No auth" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/courses/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app.router, get(&format!("/api/courses/{id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Community
// =============================================================================

#[tokio::test]
async fn contact_form_accepts_valid_submission() {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/contact",
            None,
            json!({
                "name": "Carol",
                "email": "carol@example.com",
                "subject": "Question",
                "message": "When does the premium course start?",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().is_some());
    let queries = ContactInbox::list(app.community.as_ref()).await.unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].name, "Carol");
}

#[tokio::test]
async fn contact_form_rejects_missing_fields() {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/contact",
            None,
            json!({ "name": "", "email": "carol@example.com", "subject": "s", "message": "m" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn collaboration_enquiry_records_caller_when_authenticated() {
    let app = test_app();
    let (_, signup_body) = signup(&app, "alice@example.com").await;
    let token = signup_body["token"].as_str().unwrap().to_string();

    send(
        &app.router,
        post_json(
            "/api/collaboration",
            Some(&token),
            json!({ "email": "alice@example.com" }),
        ),
    )
    .await;
    send(
        &app.router,
        post_json("/api/collaboration", None, json!({ "email": "anon@example.com" })),
    )
    .await;

    let enquiries = CollaborationInbox::list(app.community.as_ref())
        .await
        .unwrap();
    assert_eq!(enquiries.len(), 2);
    assert!(enquiries[0].user_id.is_some());
    assert!(enquiries[1].user_id.is_none());
}

#[tokio::test]
async fn newsletter_subscription_is_idempotent_per_email() {
    let app = test_app();
    for _ in 0..2 {
        let (status, _) = send(
            &app.router,
            post_json(
                "/api/newsletter/subscribe",
                None,
                json!({ "email": "carol@example.com" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let subscribers = NewsletterList::list(app.community.as_ref()).await.unwrap();
    assert_eq!(subscribers.len(), 1);
}
