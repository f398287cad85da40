//! Centralized error types for sesame.
//!
//! Uses `thiserror` for ergonomic error definitions and provides HTTP-friendly
//! conversion to API responses.
//!
//! Every authentication failure maps to a 401. Only the two Authorization
//! extraction failures carry a response body naming the problem; codec and
//! code-exchange failures all render as an empty 401 so a caller cannot tell
//! which check rejected them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Core application error type used across all sesame services.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    // === Credential extraction ===
    #[error("Authorization header must be provided")]
    MissingAuthorization,

    #[error("Invalid Authorization header format")]
    MalformedAuthorization,

    // === JWT validation ===
    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    SignatureInvalid,

    #[error("Token expired")]
    TokenExpired,

    // === One-time code exchange ===
    #[error("No outstanding login codes for identity")]
    UnknownIdentity,

    #[error("Login code does not match")]
    CodeMismatch,

    #[error("Login code expired")]
    CodeExpired,

    // === Validation errors ===
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // === Infrastructure errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingAuthorization | Self::MalformedAuthorization => StatusCode::UNAUTHORIZED,
            Self::MalformedToken | Self::SignatureInvalid | Self::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::UnknownIdentity | Self::CodeMismatch | Self::CodeExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            // The only two 401s with a distinguishable message.
            AuthError::MissingAuthorization | AuthError::MalformedAuthorization => {
                (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
            }
            AuthError::Validation { message } => {
                (status, axum::Json(json!({ "error": message }))).into_response()
            }
            // Don't leak internal details to clients
            AuthError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    status,
                    axum::Json(json!({ "error": "An internal error occurred" })),
                )
                    .into_response()
            }
            AuthError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                (
                    status,
                    axum::Json(json!({ "error": "An internal error occurred" })),
                )
                    .into_response()
            }
            // All remaining auth failures are deliberately indistinguishable.
            _ => status.into_response(),
        }
    }
}

/// Convenience type alias for Results using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_unauthorized() {
        for err in [
            AuthError::MissingAuthorization,
            AuthError::MalformedAuthorization,
            AuthError::MalformedToken,
            AuthError::SignatureInvalid,
            AuthError::TokenExpired,
            AuthError::UnknownIdentity,
            AuthError::CodeMismatch,
            AuthError::CodeExpired,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn extraction_messages_are_exact() {
        assert_eq!(
            AuthError::MissingAuthorization.to_string(),
            "Authorization header must be provided"
        );
        assert_eq!(
            AuthError::MalformedAuthorization.to_string(),
            "Invalid Authorization header format"
        );
    }
}
