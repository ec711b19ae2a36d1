//! Command implementations for shelfctl CLI

pub mod covers;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use covers::run_covers;
pub use serve::run_serve;
