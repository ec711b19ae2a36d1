//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Parameter binding for every statement
//! - No existence checks around writes; rows affected is reported instead

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect, create_pool, PoolSettings};
pub use repos::*;
