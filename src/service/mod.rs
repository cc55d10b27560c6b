//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the typed result/error envelope returned to transport layers.

pub mod book_service;
