//! Botleague API Server
//!
//! Onboards league members through GitHub OAuth and runs the Elo
//! leaderboard over submitted match results.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod rating;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::email::HttpMailer;
use adapters::github::GitHubClientImpl;
use adapters::jsonstore::JsonFileResultStore;
use adapters::sqlite::{self, SqliteMemberRepository};
use app::{OnboardingService, Provisioner, StandingsService};
use config::Config;
use rating::DEFAULT_K_FACTOR;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub onboarding_service: Arc<OnboardingService<SqliteMemberRepository, GitHubClientImpl>>,
    pub standings_service: Arc<StandingsService<JsonFileResultStore>>,
    pub results_secret_hash: String,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,botleague_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Botleague API...");

    // Load configuration
    let config = Config::from_env();
    if !config.github_oauth_enabled() {
        tracing::warn!("GitHub OAuth credentials not set, sign-in is disabled");
    }
    if config.results_secret.is_empty() {
        tracing::warn!("RESULTS_SECRET not set, result submission is disabled");
    }

    // Connect to SQLite
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlite::init_schema(&db)
        .await
        .expect("Failed to initialize schema");
    tracing::info!("Database connected");

    // Create adapters
    let member_repo = Arc::new(SqliteMemberRepository::new(db.clone()));
    let result_store = Arc::new(JsonFileResultStore::new(config.results_path.clone()));

    let github_client = Arc::new(GitHubClientImpl::new(
        config.org_name.clone(),
        config.org_token.clone(),
        config.template_repo.clone(),
        config.github_client_id.clone().unwrap_or_default(),
        config.github_client_secret.clone().unwrap_or_default(),
    ));

    let mailer = if config.mail_enabled() {
        Some(Arc::new(HttpMailer::new(
            config.mail_api_url.clone().unwrap_or_default(),
            config.mail_api_token.clone().unwrap_or_default(),
            config.mail_from.clone(),
        )))
    } else {
        tracing::info!("Mail gateway not configured, welcome emails disabled");
        None
    };

    // Create application services
    let onboarding_service = Arc::new(OnboardingService::new(
        member_repo.clone(),
        github_client.clone(),
    ));

    let standings_service = Arc::new(StandingsService::new(
        result_store.clone(),
        DEFAULT_K_FACTOR,
        config.leaderboard_path.clone(),
    ));

    // Background provisioner: polls org membership and finishes onboarding
    let provisioner = Provisioner::new(
        member_repo.clone(),
        github_client.clone(),
        mailer,
        config.org_name.clone(),
        config.mail_from.clone(),
        Duration::from_secs(config.poll_interval_secs),
    );
    tokio::spawn(provisioner.run());

    // Create app state
    let state = AppState {
        onboarding_service,
        standings_service,
        results_secret_hash: auth::hash_secret(&config.results_secret),
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Rate-limited routes (sign-in)
    let rate_limited_routes = Router::new()
        .route("/auth/login", get(handlers::login))
        .route("/auth/github/callback", get(handlers::oauth_callback))
        .layer(GovernorLayer {
            config: governor_config.clone(),
        });

    // Result ingestion (shared-secret auth, rate limited)
    let results_routes = Router::new()
        .route("/results", post(handlers::submit_results))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::results_auth_middleware,
        ))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public reads
        .route("/leaderboard", get(handlers::get_leaderboard))
        .route("/members/:username", get(handlers::get_member))
        // Merge the auth and ingestion route groups
        .merge(rate_limited_routes)
        .merge(results_routes)
        // Static site (leaderboard page)
        .fallback_service(ServeDir::new(&config.static_dir))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
