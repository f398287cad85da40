//! # sesame-db
//!
//! Database layer for sesame. PostgreSQL holds the one-time callback tokens
//! issued to identities awaiting login; everything else in the system is
//! stateless.

pub mod postgres;
pub mod repository;

use anyhow::Result;
use sqlx::PgPool;

/// Shared database state passed through Axum extractors.
#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    /// Connect to PostgreSQL.
    pub async fn connect(config: &sesame_common::config::AppConfig) -> Result<Self> {
        tracing::info!("Connecting to PostgreSQL...");
        let pg = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .connect(&config.database.url)
            .await?;

        tracing::info!("Connected to PostgreSQL");

        Ok(Self { pg })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pg).await?;
        tracing::info!("Migrations complete");
        Ok(())
    }
}
