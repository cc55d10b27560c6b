//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the catalog.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Book creation must enforce `Book::validate()` before persistence.
//! - A missing book is reported as `Ok(None)` on reads and as a semantic
//!   `NotFound` error on writes, never as a transport fault.
//! - Book creation is atomic: author resolution, the book row and its link
//!   rows become visible together or not at all.

pub mod book_repo;
pub mod memory_repo;
