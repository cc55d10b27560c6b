//! Book/author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `books`/`authors` storage.
//! - Own author-name resolution and the atomic create unit.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `create_book` must call `Book::validate()` before SQL mutations;
//!   `update_book` applies the given scalars verbatim (request-shape
//!   validation is upstream) and fails only on a missing id.
//! - Author resolution uses exact string equality; no case or whitespace
//!   normalization.
//! - `create_book` runs as a single immediate transaction; every non-commit
//!   exit path rolls back.
//! - Scalar updates never touch the author association.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::{Book, BookCategory, BookId, BookValidationError};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const BOOK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    year,
    category
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    NotFound(BookId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{column}` in table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Scalar fields replaced by `update_book`.
///
/// The author list is immutable after creation; updates carry no author
/// data at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: String,
    pub description: String,
    pub year: i32,
}

/// Repository interface for book CRUD operations.
///
/// Implemented by the SQLite production repository and the in-memory test
/// double; both honor the same atomicity and dedup semantics.
pub trait BookRepository {
    /// Persists one book and its resolved authors as a single atomic unit.
    fn create_book(&mut self, book: &Book) -> RepoResult<BookId>;
    /// Gets one book with resolved author names. Absence is `Ok(None)`.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Lists all books in storage-native order (not a contracted order).
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Replaces title/description/year only.
    fn update_book(&mut self, id: BookId, fields: &BookUpdate) -> RepoResult<()>;
    /// Removes the book row. Author rows are never cascaded.
    fn delete_book(&mut self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&mut self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut resolved = Vec::with_capacity(book.authors.len());
        for full_name in &book.authors {
            resolved.push(resolve_author_in_tx(&tx, full_name)?);
        }

        let book_uuid = book.uuid.to_string();
        tx.execute(
            "INSERT INTO books (uuid, title, description, year, category)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                book_uuid,
                book.title.as_str(),
                book.description.as_str(),
                book.year,
                category_to_db(book.category),
            ],
        )?;

        for (position, author_uuid) in resolved.iter().enumerate() {
            tx.execute(
                "INSERT INTO book_authors (book_uuid, author_uuid, position)
                 VALUES (?1, ?2, ?3);",
                params![book_uuid, author_uuid, position as i64],
            )?;
        }

        tx.commit()?;
        Ok(book.uuid)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let book = parse_book_row(self.conn, row)?;
            return Ok(Some(book));
        }

        Ok(None)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(self.conn, row)?);
        }

        Ok(books)
    }

    fn update_book(&mut self, id: BookId, fields: &BookUpdate) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?2,
                description = ?3,
                year = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                fields.title.as_str(),
                fields.description.as_str(),
                fields.year,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_book(&mut self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Resolves one author name to a stored author uuid inside the transaction.
///
/// Exact-match lookup. `INSERT OR IGNORE` against the unique index on
/// `full_name` keeps resolution race-safe when two writers commit the same
/// new name concurrently.
fn resolve_author_in_tx(tx: &Transaction<'_>, full_name: &str) -> RepoResult<String> {
    tx.execute(
        "INSERT OR IGNORE INTO authors (uuid, full_name) VALUES (?1, ?2);",
        params![Uuid::new_v4().to_string(), full_name],
    )?;

    let uuid: String = tx.query_row(
        "SELECT uuid FROM authors WHERE full_name = ?1;",
        [full_name],
        |row| row.get(0),
    )?;
    Ok(uuid)
}

fn parse_book_row(conn: &Connection, row: &rusqlite::Row<'_>) -> RepoResult<Book> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid(&uuid_text)?;

    let category_text: String = row.get("category")?;
    let category = parse_category(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in books.category"
        ))
    })?;

    let authors = load_authors_for_book(conn, &uuid_text)?;

    Ok(Book {
        uuid,
        title: row.get("title")?,
        description: row.get("description")?,
        year: row.get("year")?,
        category,
        authors,
    })
}

fn load_authors_for_book(conn: &Connection, book_uuid: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT a.full_name
         FROM book_authors ba
         INNER JOIN authors a ON a.uuid = ba.author_uuid
         WHERE ba.book_uuid = ?1
         ORDER BY ba.position ASC;",
    )?;

    let mut rows = stmt.query([book_uuid])?;
    let mut authors = Vec::new();
    while let Some(row) = rows.next()? {
        authors.push(row.get(0)?);
    }
    Ok(authors)
}

fn parse_uuid(value: &str) -> RepoResult<BookId> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in books.uuid")))
}

fn category_to_db(category: BookCategory) -> &'static str {
    match category {
        BookCategory::Fiction => "fiction",
        BookCategory::NonFiction => "non_fiction",
        BookCategory::SciFi => "sci_fi",
        BookCategory::Fantasy => "fantasy",
        BookCategory::History => "history",
        BookCategory::Biography => "biography",
    }
}

fn parse_category(value: &str) -> Option<BookCategory> {
    match value {
        "fiction" => Some(BookCategory::Fiction),
        "non_fiction" => Some(BookCategory::NonFiction),
        "sci_fi" => Some(BookCategory::SciFi),
        "fantasy" => Some(BookCategory::Fantasy),
        "history" => Some(BookCategory::History),
        "biography" => Some(BookCategory::Biography),
        _ => None,
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["books", "authors", "book_authors"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["uuid", "title", "description", "year", "category", "updated_at"] {
        if !table_has_column(conn, "books", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "books",
                column,
            });
        }
    }

    for column in ["uuid", "full_name"] {
        if !table_has_column(conn, "authors", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "authors",
                column,
            });
        }
    }

    for column in ["book_uuid", "author_uuid", "position"] {
        if !table_has_column(conn, "book_authors", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "book_authors",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
