//! CourseKit server binary.
//!
//! Loads configuration, wires adapters to ports, and serves the API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use coursekit::adapters::auth::{ChainTokenVerifier, LocalTokenService, ProviderTokenVerifier};
use coursekit::adapters::email::{RelayConfig, RelayMailer};
use coursekit::adapters::http::{
    api_router, AccountAppState, BillingAppState, CatalogAppState, CommunityAppState,
};
use coursekit::adapters::identity::{IdentityConfig, RestIdentityDirectory};
use coursekit::adapters::postgres::{
    PostgresCollaborationInbox, PostgresContactInbox, PostgresCourseCatalog,
    PostgresNewsletterList, PostgresOrderRepository, PostgresProfileStore,
    PostgresPurchaseLedger,
};
use coursekit::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use coursekit::config::AppConfig;
use coursekit::domain::billing::CallbackSigner;
use coursekit::ports::{TokenIssuer, TokenVerifier, UserDirectory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting coursekit server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Identity and tokens
    let directory: Arc<dyn UserDirectory> = Arc::new(RestIdentityDirectory::new(IdentityConfig {
        base_url: config.auth.provider_base_url.clone(),
        api_key: config.auth.provider_api_key.clone(),
    }));
    let local_tokens = Arc::new(LocalTokenService::new(
        &config.auth.token_secret,
        config.auth.token_ttl(),
    ));
    let verifier: Arc<dyn TokenVerifier> = Arc::new(ChainTokenVerifier::new(vec![
        Arc::new(ProviderTokenVerifier::new(directory.clone())),
        local_tokens.clone(),
    ]));
    let tokens: Arc<dyn TokenIssuer> = local_tokens;

    // Payments
    let gateway = Arc::new(RazorpayGateway::new(RazorpayConfig {
        key_id: config.payment.gateway_key_id.clone(),
        key_secret: config.payment.gateway_key_secret.clone(),
        base_url: config.payment.gateway_base_url.clone(),
        timeout: config.payment.gateway_timeout(),
    }));
    let signer = Arc::new(CallbackSigner::new(config.payment.gateway_key_secret.clone()));

    // Mail
    let mailer = Arc::new(RelayMailer::new(RelayConfig {
        url: config.email.relay_url.clone(),
        api_key: config.email.relay_api_key.clone(),
        from: config.email.from_header(),
    }));

    // Persistence
    let profiles = Arc::new(PostgresProfileStore::new(pool.clone()));

    let account = AccountAppState {
        directory: directory.clone(),
        profiles: profiles.clone(),
        mailer,
        tokens,
    };
    let billing = BillingAppState {
        orders: Arc::new(PostgresOrderRepository::new(pool.clone())),
        purchases: Arc::new(PostgresPurchaseLedger::new(pool.clone())),
        profiles,
        gateway,
        signer,
        currency: config.payment.currency.clone(),
    };
    let catalog = CatalogAppState {
        catalog: Arc::new(PostgresCourseCatalog::new(pool.clone())),
    };
    let community = CommunityAppState {
        contact: Arc::new(PostgresContactInbox::new(pool.clone())),
        collaboration: Arc::new(PostgresCollaborationInbox::new(pool.clone())),
        newsletter: Arc::new(PostgresNewsletterList::new(pool)),
    };

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        origins => {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(parsed)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any)
        }
    };

    let app = api_router(verifier, account, billing, catalog, community)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
