//! Test/sandbox account registry.
//!
//! Pre-registered emails bypass code delivery and JWT signature checks so
//! that integration environments can authenticate without a mailbox. The
//! bypass decision lives here and only here — request-code, exchange, and
//! both verify paths all consult the same [`TestAccounts`] instance.
//!
//! Each test account has a deterministic login code derived from the signing
//! secret, so tooling can compute it without a round-trip:
//! first 12 hex chars of SHA-256(jwt_secret || email).

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::AuthConfig;

/// Hex length of a derived test-account login code.
const TEST_CODE_LEN: usize = 12;

/// Immutable set of sandbox identities, cheap to clone into request state.
#[derive(Debug, Clone)]
pub struct TestAccounts {
    emails: Arc<HashSet<String>>,
    secret: Arc<str>,
}

impl TestAccounts {
    /// Build the registry from the `auth.test_accounts` comma-separated list.
    pub fn from_config(auth: &AuthConfig) -> Self {
        let emails = auth
            .test_accounts
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            emails: Arc::new(emails),
            secret: auth.jwt_secret.as_str().into(),
        }
    }

    /// Is this email a registered sandbox identity? Exact match, no
    /// normalization.
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    /// Deterministic login code for a sandbox identity.
    pub fn token_for(&self, email: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(email.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)[..TEST_CODE_LEN].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(list: &str) -> TestAccounts {
        TestAccounts::from_config(&AuthConfig {
            jwt_secret: "unit-test-secret".into(),
            jwt_ttl_secs: 3600,
            otp_ttl_secs: 600,
            otp_clean_seconds: 1800,
            long_live_time: 4_102_444_800,
            test_accounts: list.into(),
        })
    }

    #[test]
    fn membership_is_exact_match() {
        let accounts = accounts("sandbox@example.com, qa@example.com");
        assert!(accounts.contains("sandbox@example.com"));
        assert!(accounts.contains("qa@example.com"));
        assert!(!accounts.contains("Sandbox@example.com"));
        assert!(!accounts.contains("other@example.com"));
        assert!(!accounts.contains(""));
    }

    #[test]
    fn empty_config_has_no_accounts() {
        let accounts = accounts("");
        assert!(!accounts.contains("sandbox@example.com"));
    }

    #[test]
    fn test_code_is_deterministic_and_per_email() {
        let accounts = accounts("sandbox@example.com,qa@example.com");
        let code = accounts.token_for("sandbox@example.com");
        assert_eq!(code, accounts.token_for("sandbox@example.com"));
        assert_eq!(code.len(), TEST_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(code, accounts.token_for("qa@example.com"));
    }
}
