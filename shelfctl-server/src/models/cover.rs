//! Cover lookup selectors and results
//!
//! Identifier scheme, size and identifier are all validated at construction,
//! so an outbound URL is only ever built from known-good parts.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ValidationError;

/// Maximum length for cover identifiers
const MAX_IDENTIFIER_LEN: usize = 64;

/// Identifier pattern: alphanumerics and hyphens only (ISBN-10 may end in X)
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z-]+$").expect("invalid identifier regex"));

/// Namespace a cover identifier is interpreted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoverScheme {
    #[default]
    Isbn,
    Oclc,
    Lccn,
    Olid,
    Id,
}

impl CoverScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isbn => "isbn",
            Self::Oclc => "oclc",
            Self::Lccn => "lccn",
            Self::Olid => "olid",
            Self::Id => "id",
        }
    }
}

impl FromStr for CoverScheme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isbn" => Ok(Self::Isbn),
            "oclc" => Ok(Self::Oclc),
            "lccn" => Ok(Self::Lccn),
            "olid" => Ok(Self::Olid),
            "id" => Ok(Self::Id),
            other => Err(ValidationError::InvalidVariant {
                field: "cover scheme",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for CoverScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cover image size: small, medium or large
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoverSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl CoverSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }
}

impl FromStr for CoverSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Self::Small),
            "M" => Ok(Self::Medium),
            "L" => Ok(Self::Large),
            other => Err(ValidationError::InvalidVariant {
                field: "cover size",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated cover identifier (ISBN, OCLC number, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverId(String);

impl CoverId {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "identifier" });
        }

        if s.len() > MAX_IDENTIFIER_LEN {
            return Err(ValidationError::TooLong {
                field: "identifier",
                max: MAX_IDENTIFIER_LEN,
            });
        }

        if !IDENTIFIER_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "identifier",
                reason: "must contain only letters, digits and hyphens",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CoverId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One entry of a bulk cover lookup
///
/// `image` is a `data:` URI, or empty when the lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverLookupResult {
    pub identifier: String,
    pub image: String,
}

impl CoverLookupResult {
    pub fn found(identifier: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            identifier: identifier.into(),
            image: format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)),
        }
    }

    pub fn missing(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            image: String::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.image.is_empty()
    }
}
