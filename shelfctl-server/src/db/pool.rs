//! PostgreSQL pool for the books table
//!
//! Connections identify themselves as `shelfctl` in `pg_stat_activity`, and
//! a request waits at most `acquire_timeout` for a free connection so a stuck
//! pool surfaces as a 500 instead of a hung page.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections. A single-user book list needs few.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default wait for a free connection
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// `application_name` reported by every connection
pub const APPLICATION_NAME: &str = "shelfctl";

/// Pool sizing and wait limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Parse a connection URL and tag it with the shelfctl application name.
pub fn connect_options(database_url: &str) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::from_str(database_url)?.application_name(APPLICATION_NAME))
}

/// Connect with default settings.
///
/// ```ignore
/// let pool = create_pool("postgres://postgres@localhost/book_list").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect(database_url, &PoolSettings::default()).await
}

/// Connect with explicit settings.
pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(database_url)?;

    PgPoolOptions::new()
        .max_connections(settings.max_connections.max(1))
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
}
