//! JWT verification routes.
//!
//! Two transports for the same decision: `POST /auth/verify` takes the token
//! in the body, `GET /auth/verify` reads it from the `Authorization` header
//! or cookie (forward-auth style, driven entirely by request headers).
//!
//! Both apply the test-account bypass before touching the codec, so sandbox
//! identities behave identically regardless of transport.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use sesame_common::{config, error::AuthResult};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    auth::{self, Claims},
    extract::{extract_credential, Extraction},
    AppState,
};

/// Verification router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/verify", post(verify_body).get(verify_header))
}

#[derive(Deserialize)]
struct VerifyRequest {
    email: Option<String>,
    token: String,
}

/// POST /api/v1/auth/verify
///
/// Verify a JWT submitted as a body field. Returns the decoded claims, or a
/// bare 401 — no detail distinguishes malformed, bad-signature, or expired.
async fn verify_body(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VerifyRequest>,
) -> AuthResult<Json<Claims>> {
    let config = config::get();

    if let Some(email) = body.email.as_deref() {
        if state.test_accounts.contains(email) {
            return Ok(Json(auth::long_lived_claims(
                email,
                config.auth.long_live_time,
            )));
        }
    }

    let claims = auth::validate_token(&body.token, &config.auth.jwt_secret)?;
    Ok(Json(claims))
}

/// GET /api/v1/auth/verify
///
/// Verify a JWT carried in headers. A forwarded OPTIONS preflight succeeds
/// with an empty body before any credential processing. The two extraction
/// failures are the only 401s that carry a message.
async fn verify_header(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AuthResult<Response> {
    let config = config::get();

    let (token, email_hint) = match extract_credential(&headers)? {
        Extraction::Preflight => return Ok(StatusCode::OK.into_response()),
        Extraction::Credential {
            token, email_hint, ..
        } => (token, email_hint),
    };

    if let Some(email) = email_hint.as_deref() {
        if state.test_accounts.contains(email) {
            return Ok(Json(auth::long_lived_claims(
                email,
                config.auth.long_live_time,
            ))
            .into_response());
        }
    }

    let claims = auth::validate_token(&token, &config.auth.jwt_secret)?;
    Ok(Json(claims).into_response())
}
