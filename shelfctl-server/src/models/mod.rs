//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod book;
pub mod cover;

pub use validation::ValidationError;
pub use book::{Book, BookFields, BookForm, BookId, DeleteForm};
pub use cover::{CoverId, CoverLookupResult, CoverScheme, CoverSize};
