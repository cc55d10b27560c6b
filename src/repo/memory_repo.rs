//! In-memory book repository test double.
//!
//! # Responsibility
//! - Implement the full `BookRepository` contract without a storage backend.
//! - Mirror the SQLite repository's semantics: exact-name author dedup,
//!   all-or-nothing create, no author cascade on delete.
//!
//! # Invariants
//! - State is an injected handle owned by the caller, never process-global.
//! - A failed `create_book` leaves books and authors exactly as before.

use crate::model::book::{Book, BookCategory, BookId};
use crate::repo::book_repo::{BookRepository, BookUpdate, RepoError, RepoResult};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

type AuthorId = Uuid;

#[derive(Debug, Clone)]
struct StoredBook {
    title: String,
    description: String,
    year: i32,
    category: BookCategory,
    /// Ordered author references; duplicates allowed, matching link rows.
    author_ids: Vec<AuthorId>,
}

/// In-memory repository holding books and deduplicated author records.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: BTreeMap<BookId, StoredBook>,
    authors: HashMap<AuthorId, String>,
    authors_by_name: HashMap<String, AuthorId>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct stored author records.
    ///
    /// Exposed so tests can assert dedup-by-name without reaching into
    /// internals.
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    fn resolve_book(&self, id: BookId, stored: &StoredBook) -> RepoResult<Book> {
        let mut authors = Vec::with_capacity(stored.author_ids.len());
        for author_id in &stored.author_ids {
            let full_name = self.authors.get(author_id).ok_or_else(|| {
                RepoError::InvalidData(format!("dangling author reference: {author_id}"))
            })?;
            authors.push(full_name.clone());
        }

        Ok(Book {
            uuid: id,
            title: stored.title.clone(),
            description: stored.description.clone(),
            year: stored.year,
            category: stored.category,
            authors,
        })
    }
}

impl BookRepository for MemoryBookRepository {
    fn create_book(&mut self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;

        // Stage author creations so a failing insert publishes nothing.
        let mut staged_authors: Vec<(AuthorId, String)> = Vec::new();
        let mut staged_by_name: HashMap<&str, AuthorId> = HashMap::new();
        let mut author_ids = Vec::with_capacity(book.authors.len());

        for full_name in &book.authors {
            let author_id = match self.authors_by_name.get(full_name) {
                Some(existing) => *existing,
                None => match staged_by_name.get(full_name.as_str()) {
                    Some(staged) => *staged,
                    None => {
                        let fresh = Uuid::new_v4();
                        staged_authors.push((fresh, full_name.clone()));
                        staged_by_name.insert(full_name.as_str(), fresh);
                        fresh
                    }
                },
            };
            author_ids.push(author_id);
        }

        if self.books.contains_key(&book.uuid) {
            return Err(RepoError::InvalidData(format!(
                "book id already exists: {}",
                book.uuid
            )));
        }

        for (author_id, full_name) in staged_authors {
            self.authors.insert(author_id, full_name.clone());
            self.authors_by_name.insert(full_name, author_id);
        }

        self.books.insert(
            book.uuid,
            StoredBook {
                title: book.title.clone(),
                description: book.description.clone(),
                year: book.year,
                category: book.category,
                author_ids,
            },
        );

        Ok(book.uuid)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        match self.books.get(&id) {
            Some(stored) => Ok(Some(self.resolve_book(id, stored)?)),
            None => Ok(None),
        }
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.books
            .iter()
            .map(|(id, stored)| self.resolve_book(*id, stored))
            .collect()
    }

    fn update_book(&mut self, id: BookId, fields: &BookUpdate) -> RepoResult<()> {
        let stored = self.books.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        stored.title = fields.title.clone();
        stored.description = fields.description.clone();
        stored.year = fields.year;
        Ok(())
    }

    fn delete_book(&mut self, id: BookId) -> RepoResult<()> {
        if self.books.remove(&id).is_none() {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}
