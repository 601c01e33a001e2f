//! The auth service that campus rides clients log into.

/// Per-request database connections
mod conn;

/// The one error type handlers return
mod error;

/// Route handlers
mod handlers;

/// Issuing and checking tokens
mod jwt;

/// Account roles
mod role;

/// Shared request state
mod state;

use axum::http::header::AUTHORIZATION;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::{iter::once, time::Duration};
use tokio::net::TcpListener;
use tower_http::{compression, limit, sensitive_headers, timeout, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
struct Config {
    /// Address to listen on
    #[clap(long, env, default_value = "127.0.0.1:8080")]
    address: String,

    /// Postgres connection string
    #[clap(long, env)]
    database_url: String,

    /// Base64-encoded secret for signing tokens
    #[clap(long, env)]
    jwt_secret: String,

    /// Request body size limit, in bytes
    #[clap(long, env, default_value = "65536")]
    body_limit: usize,

    /// Request timeout, in seconds
    #[clap(long, env, default_value = "5", value_parser = duration_parser)]
    request_timeout: Duration,
}

/// Parse a whole number of seconds into a `Duration`.
fn duration_parser(s: &str) -> Result<Duration, std::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}

#[tokio::main]
async fn main() {
    let options = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .connect(&options.database_url)
        .await
        .expect("failed to connect to the database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let state = AppState::new(pool, &options.jwt_secret)
        .expect("jwt secret should be valid base64");

    let app = Router::new()
        .route("/health", get(handlers::health::handler))
        .route("/api/auth/login", post(handlers::login::handler))
        .route("/api/auth/signup", post(handlers::signup::handler))
        .route("/api/auth/me", get(handlers::me::handler))
        .layer(trace::TraceLayer::new_for_http())
        .layer(compression::CompressionLayer::new())
        .layer(limit::RequestBodyLimitLayer::new(options.body_limit))
        .layer(sensitive_headers::SetSensitiveHeadersLayer::new(once(
            AUTHORIZATION,
        )))
        .layer(timeout::TimeoutLayer::new(options.request_timeout))
        .with_state(state);

    let listener = TcpListener::bind(options.address)
        .await
        .expect("failed to bind the listen address");
    tracing::info!(address = ?listener.local_addr(), "listening");

    axum::serve(listener, app).await.expect("server exited");
}
