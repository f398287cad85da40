//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > config.toml > defaults

use serde::Deserialize;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the global application configuration.
///
/// # Panics
/// Panics if config has not been initialized via [`init`].
pub fn get() -> &'static AppConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call sesame_common::config::init() first.")
}

/// Initialize the global configuration from environment.
///
/// Should be called once at application startup, before any other code
/// accesses config. `database.url` and `auth.jwt_secret` have no defaults;
/// a missing value aborts startup here rather than failing per-request.
pub fn init() -> Result<&'static AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::builder()
        // Defaults
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.max_connections", 20)?
        .set_default("database.min_connections", 5)?
        .set_default("auth.jwt_ttl_secs", 86_400)? // 24h
        .set_default("auth.otp_ttl_secs", 600)? // one-time codes live 10 min
        .set_default("auth.otp_clean_seconds", 1800)? // prune codes older than 30 min
        .set_default("auth.long_live_time", 4_102_444_800_i64)? // 2100-01-01, test-account sentinel
        .set_default("auth.test_accounts", "")?
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (SESAME_SERVER__HOST, SESAME_AUTH__JWT_SECRET, etc.)
        .add_source(
            config::Environment::with_prefix("SESAME")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT signing secret (HS256) — should be 256+ bits of entropy
    pub jwt_secret: String,
    /// JWT lifetime in seconds
    pub jwt_ttl_secs: u64,
    /// One-time login code validity window in seconds
    pub otp_ttl_secs: u64,
    /// Codes older than this many seconds are pruned on every exchange attempt
    pub otp_clean_seconds: u64,
    /// Expiry (Unix timestamp) reported for test-account claims
    pub long_live_time: i64,
    /// Comma-separated emails that bypass delivery and signature checks
    pub test_accounts: String,
}
