//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its category set.
//! - Provide the storage-integrity validation applied on write paths.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another book.
//! - `authors` keeps input order; order matters for display, not identity.
//! - Author names are compared by exact string equality everywhere.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a book record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = Uuid;

/// Fixed category set for catalog books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookCategory {
    Fiction,
    NonFiction,
    SciFi,
    Fantasy,
    History,
    Biography,
}

/// Canonical book record.
///
/// Author entries are names, not author ids; the repository resolves them
/// to stored author rows on create and back to names on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable global ID used for lookups and external references.
    pub uuid: BookId,
    pub title: String,
    pub description: String,
    /// Publication year.
    pub year: i32,
    pub category: BookCategory,
    /// Ordered author names as supplied by the caller.
    pub authors: Vec<String>,
}

impl Book {
    /// Creates a new book with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        year: i32,
        category: BookCategory,
        authors: Vec<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, description, year, category, authors)
    }

    /// Creates a book with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        uuid: BookId,
        title: impl Into<String>,
        description: impl Into<String>,
        year: i32,
        category: BookCategory,
        authors: Vec<String>,
    ) -> Self {
        Self {
            uuid,
            title: title.into(),
            description: description.into(),
            year,
            category,
            authors,
        }
    }

    /// Checks storage-integrity rules enforced on repository write paths.
    ///
    /// Request-shape validation belongs to the upstream caller; these rules
    /// only reject records that storage could not represent meaningfully.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.authors.is_empty() {
            return Err(BookValidationError::NoAuthors);
        }
        for (position, name) in self.authors.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(BookValidationError::EmptyAuthorName { position });
            }
        }
        Ok(())
    }
}

/// Validation error for book write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    NoAuthors,
    EmptyAuthorName { position: usize },
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::NoAuthors => write!(f, "book must have at least one author"),
            Self::EmptyAuthorName { position } => {
                write!(f, "author name at position {position} must not be empty")
            }
        }
    }
}

impl Error for BookValidationError {}
