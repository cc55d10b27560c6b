//! Core domain logic for the book catalog service.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookCategory, BookId, BookValidationError};
pub use repo::book_repo::{
    BookRepository, BookUpdate, RepoError, RepoResult, SqliteBookRepository,
};
pub use repo::memory_repo::MemoryBookRepository;
pub use service::book_service::{
    BookService, BookView, CatalogError, CreateBookRequest, ErrorKind, ServiceResult,
    UpdateBookRequest,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
