//! # Sesame Server
//!
//! Passwordless authentication service: one-time login codes delivered
//! out-of-band, exchanged for JWTs, verified by header, cookie, or body.
//!
//! Startup is fail-fast — a missing database URL or JWT secret aborts here
//! rather than surfacing per-request.

use sesame_api::{build_router, delivery::LogDelivery, AppState};
use sesame_common::testaccount::TestAccounts;
use sesame_db::Database;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = sesame_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sesame=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting sesame v{}", env!("CARGO_PKG_VERSION"));

    // Connect to the database and apply migrations
    let db = Database::connect(config).await?;
    db.migrate().await?;

    let test_accounts = TestAccounts::from_config(&config.auth);

    let state = AppState {
        db,
        delivery: Arc::new(LogDelivery),
        test_accounts,
    };
    let router = build_router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("sesame listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
