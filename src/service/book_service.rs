//! Book use-case service and result/error envelope.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for transport callers.
//! - Map wire DTOs to the domain model and back to view shapes.
//! - Convert repository outcomes into the typed `CatalogError` envelope.
//!
//! # Invariants
//! - No raw repository fault crosses the service boundary; callers only
//!   ever see a `ServiceResult`.
//! - The service is the single place where a read-path absence becomes a
//!   `NotFound` error.
//! - The service performs no persistence of its own.

use crate::model::book::{Book, BookCategory, BookId};
use crate::repo::book_repo::{BookRepository, BookUpdate, RepoError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, CatalogError>;

/// Error category exposed to transport layers.
///
/// The conventional status mapping (NotFound → 404, Validation → 400,
/// ServerError → 500) belongs to the caller; the core only guarantees the
/// kind is correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Validation,
    ServerError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::ServerError => "server_error",
        };
        write!(f, "{label}")
    }
}

/// Typed failure carried by every service result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn book_not_found(id: BookId) -> Self {
        Self::new(ErrorKind::NotFound, format!("book not found: {id}"))
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for CatalogError {}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::book_not_found(id),
            RepoError::Validation(err) => Self::new(ErrorKind::Validation, err.to_string()),
            // Storage/infrastructure faults all surface as ServerError with
            // the underlying message preserved for diagnostics.
            other => Self::new(ErrorKind::ServerError, other.to_string()),
        }
    }
}

/// Request model for creating a book.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub category: BookCategory,
    /// Ordered author names; resolved to author records on persistence.
    pub authors: Vec<String>,
}

/// Request model for updating a book's scalar fields.
///
/// Deliberately carries no author data: the author list is immutable after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateBookRequest {
    pub title: String,
    pub description: String,
    pub year: i32,
}

/// Read model returned to transport callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub id: BookId,
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,
    pub year: i32,
    pub category: BookCategory,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            id: book.uuid,
            title: book.title,
            authors: book.authors,
            description: book.description,
            year: book.year,
            category: book.category,
        }
    }
}

/// Use-case service wrapper for book CRUD operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a book and its resolved authors, returning the new book id.
    pub fn create_book(&mut self, request: &CreateBookRequest) -> ServiceResult<BookId> {
        let book = Book::new(
            request.title.clone(),
            request.description.clone(),
            request.year,
            request.category,
            request.authors.clone(),
        );
        let id = self.repo.create_book(&book)?;
        Ok(id)
    }

    /// Gets one book view by id.
    ///
    /// A repository lookup miss becomes `ErrorKind::NotFound` here, and only
    /// here.
    pub fn get_book(&self, id: BookId) -> ServiceResult<BookView> {
        match self.repo.get_book(id)? {
            Some(book) => Ok(BookView::from(book)),
            None => Err(CatalogError::book_not_found(id)),
        }
    }

    /// Lists all book views in storage-native order.
    pub fn list_books(&self) -> ServiceResult<Vec<BookView>> {
        let books = self.repo.list_books()?;
        Ok(books.into_iter().map(BookView::from).collect())
    }

    /// Updates title/description/year of an existing book.
    pub fn update_book(&mut self, id: BookId, request: &UpdateBookRequest) -> ServiceResult<()> {
        let fields = BookUpdate {
            title: request.title.clone(),
            description: request.description.clone(),
            year: request.year,
        };
        self.repo.update_book(id, &fields)?;
        Ok(())
    }

    /// Deletes an existing book. Authors stay, even when unreferenced.
    pub fn delete_book(&mut self, id: BookId) -> ServiceResult<()> {
        self.repo.delete_book(id)?;
        Ok(())
    }
}
