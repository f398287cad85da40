//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::Validate;

use crate::error::AuthError;

/// Validate a request body, returning an AuthError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), AuthError> {
    body.validate().map_err(|e| AuthError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct EmailBody {
        #[validate(email)]
        email: String,
    }

    #[test]
    fn rejects_invalid_email() {
        let body = EmailBody {
            email: "not-an-email".into(),
        };
        assert!(matches!(
            validate_request(&body),
            Err(AuthError::Validation { .. })
        ));
    }

    #[test]
    fn accepts_valid_email() {
        let body = EmailBody {
            email: "user@example.com".into(),
        };
        assert!(validate_request(&body).is_ok());
    }
}
