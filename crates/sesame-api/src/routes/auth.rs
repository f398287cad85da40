//! Passwordless login routes — request a one-time code, exchange it for a JWT.

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sesame_common::{
    config,
    error::{AuthError, AuthResult},
    validation::validate_request,
};
use sesame_db::repository::callback_tokens::{self, CallbackToken};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::{auth, AppState};

/// Auth router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/email", post(request_code))
        .route("/auth/token", post(exchange_code))
}

#[derive(Deserialize, Validate)]
struct EmailRequest {
    #[validate(email)]
    email: String,
}

#[derive(Deserialize, Validate)]
struct ExchangeRequest {
    #[validate(email)]
    email: String,
    token: String,
}

#[derive(Serialize)]
struct DetailResponse {
    detail: String,
}

#[derive(Serialize)]
struct ExchangeResponse {
    email: String,
    token: String,
}

/// POST /api/v1/auth/email
///
/// Request a one-time login code. Sandbox identities get no code delivered —
/// their deterministic code is already known to the caller's tooling.
async fn request_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EmailRequest>,
) -> AuthResult<Json<DetailResponse>> {
    validate_request(&body)?;

    if state.test_accounts.contains(&body.email) {
        return Ok(Json(DetailResponse {
            detail: format!("test account email '{}' available", body.email),
        }));
    }

    let code = generate_code();
    callback_tokens::create_token(&state.db.pg, &body.email, &code).await?;
    state
        .delivery
        .send_code(&body.email, &code)
        .await
        .map_err(AuthError::Internal)?;

    tracing::info!(email = %body.email, "Login code sent");

    Ok(Json(DetailResponse {
        detail: "A login code has been sent to your email.".into(),
    }))
}

/// POST /api/v1/auth/token
///
/// Exchange a one-time code for a JWT. Sandbox identities bypass the store
/// entirely; everyone else must present an outstanding, unexpired code.
/// Which check failed is never revealed — all failures are a bare 401.
async fn exchange_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExchangeRequest>,
) -> AuthResult<Json<ExchangeResponse>> {
    validate_request(&body)?;
    let config = config::get();

    if state.test_accounts.contains(&body.email) {
        if body.token != state.test_accounts.token_for(&body.email) {
            return Err(AuthError::CodeMismatch);
        }
        let jwt = issue_jwt(&body.email)?;
        return Ok(Json(ExchangeResponse {
            email: body.email,
            token: jwt,
        }));
    }

    let now = Utc::now();
    let tokens = callback_tokens::find_by_email(&state.db.pg, &body.email).await?;
    let outcome = match_code(&tokens, &body.token, now, config.auth.otp_ttl_secs);

    // Opportunistic sweep: every exchange attempt, pass or fail, prunes
    // codes older than the cleanup threshold across all identities. There
    // is no background sweeper. A failed sweep never fails the exchange.
    let cutoff = now - Duration::seconds(config.auth.otp_clean_seconds as i64);
    match callback_tokens::delete_older_than(&state.db.pg, cutoff).await {
        Ok(removed) if removed > 0 => {
            tracing::debug!(removed, "Pruned stale callback tokens");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to prune stale callback tokens: {e}"),
    }

    outcome?;

    let jwt = issue_jwt(&body.email)?;
    tracing::info!(email = %body.email, "One-time code exchanged for JWT");

    Ok(Json(ExchangeResponse {
        email: body.email,
        token: jwt,
    }))
}

fn issue_jwt(email: &str) -> AuthResult<String> {
    let config = config::get();
    auth::issue_token(email, &config.auth.jwt_secret, config.auth.jwt_ttl_secs)
        .map_err(|e| AuthError::Internal(e.into()))
}

/// Pick the exchange outcome for a presented code against the outstanding
/// codes of one identity.
///
/// Codes are not consumed on match: two concurrent exchanges for the same
/// identity can both observe the same row before the sweep removes it.
/// Single-use semantics would need an atomic consume-on-match at the store.
fn match_code(
    tokens: &[CallbackToken],
    presented: &str,
    now: DateTime<Utc>,
    ttl_secs: u64,
) -> Result<(), AuthError> {
    if tokens.is_empty() {
        return Err(AuthError::UnknownIdentity);
    }

    let hit = tokens
        .iter()
        .find(|t| t.token == presented)
        .ok_or(AuthError::CodeMismatch)?;

    if now - hit.created_at >= Duration::seconds(ttl_secs as i64) {
        return Err(AuthError::CodeExpired);
    }

    Ok(())
}

/// Six-digit numeric login code, zero-padded.
fn generate_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000))
}
