//! SQLite connection pool handle, migration runner, and query building.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use book_kernel::settings::DatabaseSettings;

pub mod convert;
pub mod entity;
pub mod error;
mod migrate;
pub mod page;
pub mod select;

pub use entity::Entity;
pub use error::{RepositoryError, RepositoryResult, TypeConversionError};
pub use page::{Direction, Order, Pageable};

/// Shared database handle, created at startup and closed on shutdown.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool for the configured database.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        tracing::info!(
            target: "book-db",
            url = %settings.url,
            max_connections = settings.max_connections,
            "connecting to database"
        );

        let options = SqliteConnectOptions::from_str(&settings.url)
            .with_context(|| format!("invalid database url '{}'", settings.url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .min_connections(settings.min_connections)
            .connect_with(options)
            .await
            .context("failed to open database pool")?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection, waiting for checked-out ones to return.
    pub async fn close(&self) {
        tracing::info!(target: "book-db", "closing database pool");
        self.pool.close().await;
    }
}
