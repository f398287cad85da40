//! Code delivery — the external collaborator that gets a one-time login
//! code to the user out-of-band (email, usually).
//!
//! The API only depends on the [`CodeDelivery`] seam; production deploys
//! plug in a real mailer, development uses [`LogDelivery`].

use async_trait::async_trait;

/// Deliver a one-time login code to an identity.
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    async fn send_code(&self, email: &str, code: &str) -> anyhow::Result<()>;
}

/// Development delivery: write the code to the log instead of sending it.
/// Do not use in production — codes end up in plaintext log output.
pub struct LogDelivery;

#[async_trait]
impl CodeDelivery for LogDelivery {
    async fn send_code(&self, email: &str, code: &str) -> anyhow::Result<()> {
        tracing::info!(%email, %code, "Login code (log delivery)");
        Ok(())
    }
}
