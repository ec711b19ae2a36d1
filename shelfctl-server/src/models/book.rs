//! Book record and form parsing
//!
//! `Book` is the row as stored. `BookFields` is everything an update may
//! overwrite. `BookForm` is the raw urlencoded submission, converted into
//! `BookFields` with optional fields normalized to `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Storage-assigned primary key
pub type BookId = i32;

/// Date format accepted for `recency` (matches `<input type="date">`)
const RECENCY_FORMAT: &str = "%Y-%m-%d";

/// Book record from the `books` table
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub rating: i32,
    /// Date the book was last read
    pub recency: Option<NaiveDate>,
    pub notes: Option<String>,
    pub isbn: Option<String>,
}

impl Book {
    pub fn from_fields(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            rating: fields.rating,
            recency: fields.recency,
            notes: fields.notes,
            isbn: fields.isbn,
        }
    }
}

/// Mutable attributes of a book (everything but `id`)
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub rating: i32,
    pub recency: Option<NaiveDate>,
    pub notes: Option<String>,
    pub isbn: Option<String>,
}

/// Raw create/update form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rating: String,
    pub recency: Option<String>,
    pub notes: Option<String>,
    pub isbn: Option<String>,
}

impl TryFrom<BookForm> for BookFields {
    type Error = ValidationError;

    fn try_from(form: BookForm) -> Result<Self, Self::Error> {
        let title = required(form.title, "title")?;
        let author = required(form.author, "author")?;

        let rating = required(form.rating, "rating")?
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "rating",
                reason: "must be a whole number",
            })?;

        let recency = optional(form.recency)
            .map(|s| NaiveDate::parse_from_str(&s, RECENCY_FORMAT))
            .transpose()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "recency",
                reason: "must be a date in YYYY-MM-DD format",
            })?;

        Ok(Self {
            title,
            author,
            rating,
            recency,
            notes: optional(form.notes),
            isbn: optional(form.isbn),
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// Missing and blank both become `None` so storage sees NULL.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Delete form submission
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "deleteBookId")]
    pub delete_book_id: BookId,
}
