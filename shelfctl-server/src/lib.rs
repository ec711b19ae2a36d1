//! shelfctl-server: book list web app with a cover image proxy
//!
//! - `db`: PostgreSQL pool, versioned migrations, `BookStore` repositories
//! - `covers`: outbound cover lookups with bounded fan-out
//! - `http`: axum router, handlers and HTML views
//! - `models`: validated domain types

pub mod covers;
pub mod db;
pub mod http;
pub mod models;

pub use covers::{CoverAggregator, CoverConfig};
pub use db::{BookStore, DbError, MemoryBookStore, PgBookStore};
pub use http::{run_server, AppState, ServerConfig};
