//! # sesame-api
//!
//! REST API layer for sesame. Provides the passwordless login endpoints:
//! request a one-time code by email, exchange it for a JWT, and verify a
//! JWT presented by body, header, or cookie.

pub mod auth;
pub mod delivery;
pub mod extract;
pub mod routes;

use axum::Router;
use sesame_common::testaccount::TestAccounts;
use sesame_db::Database;
use std::sync::Arc;

use crate::delivery::CodeDelivery;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// External delivery collaborator for sending login codes.
    pub delivery: Arc<dyn CodeDelivery>,
    /// Sandbox identity registry — the single bypass decision point for
    /// issuance, exchange, and both verification paths.
    pub test_accounts: TestAccounts,
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(routes::auth::router())
        .merge(routes::verify::router())
        .merge(routes::health::router());

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
