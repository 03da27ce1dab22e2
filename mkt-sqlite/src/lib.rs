#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// Unified error type for everything this backend can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the underlying store
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),

    /// Error applying the embedded migrations
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Bid admission kept losing its check-and-swap race and gave up
    #[error("bid admission retries exhausted")]
    Contention,
}

/// SQLite implementation of the marketplace repositories.
///
/// Two connection pools back the repository traits from `mkt-core`: `reader`
/// allows concurrent reads, `writer` is capped at a single connection so all
/// writes are serialized, which is how SQLite wants to be driven in WAL mode.
/// Every multi-statement operation (bid admission, settlement, listing
/// creation with wish promotion) runs inside one transaction on the writer.
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates the database if missing (when `create_if_missing` is set) and
    /// applies all pending migrations. With no `database_path` configured, a
    /// uniquely named shared-cache in-memory database is opened instead;
    /// shared-cache naming is what lets the reader and writer pools observe
    /// the same in-memory instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the connection fails or migrations cannot be
    /// applied.
    pub async fn open(config: &SqliteConfig) -> Result<Self, Error> {
        let url = match &config.database_path {
            Some(path) => path.to_string_lossy().into_owned(),
            None => format!(
                "sqlite:file:mkt-{}?mode=memory&cache=shared",
                uuid::Uuid::new_v4().simple()
            ),
        };

        let options = sqlite::SqliteConnectOptions::from_str(&url)?
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .journal_mode(sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlite::SqliteSynchronous::Normal)
            .pragma("journal_size_limit", "27103364")
            .pragma("mmap_size", "134217728")
            .pragma("temp_store", "memory")
            .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        // min_connections keeps at least one handle alive, which also keeps a
        // shared-cache in-memory database from being dropped between calls
        let writer = sqlite::SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self { reader, writer })
    }
}
