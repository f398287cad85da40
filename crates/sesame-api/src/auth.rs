//! JWT issuance and validation — the codec half of passwordless login.
//!
//! Tokens are HS256-signed with the single process-wide secret from config.
//! The key is loaded once at startup and never rotated mid-process.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use sesame_common::error::AuthError;
use serde::{Deserialize, Serialize};

/// JWT claims embedded in issued tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (email)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issue a signed JWT for an email.
///
/// Fails only on signing-key misconfiguration; any well-formed email
/// encodes cleanly.
pub fn issue_token(
    email: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs as i64)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate and decode a presented JWT.
///
/// Never panics on untrusted input — garbage, a bad signature, and an
/// expired token each map to their own [`AuthError`] variant (all of which
/// render as the same generic 401 at the boundary).
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => Ok(data.claims),
        Err(e) => Err(match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
            _ => AuthError::MalformedToken,
        }),
    }
}

/// Synthetic claims for a test/sandbox account.
///
/// Verification of sandbox identities never runs through the codec; both
/// verify transports return these claims with the configured sentinel
/// expiry instead.
pub fn long_lived_claims(email: &str, sentinel_exp: i64) -> Claims {
    Claims {
        sub: email.to_string(),
        iat: Utc::now().timestamp(),
        exp: sentinel_exp,
    }
}
