//! Route handlers organized by resource

pub mod health;
pub mod books;
pub mod covers;
