//! Domain model for the book catalog.
//!
//! # Responsibility
//! - Define the canonical book shape shared by repository and service layers.
//! - Keep author names as plain ordered strings; author identity is a
//!   storage-layer resolution detail, not part of the domain shape.
//!
//! # Invariants
//! - Every book is identified by a stable `BookId`.
//! - Author list order is preserved from input and significant for display.

pub mod book;
