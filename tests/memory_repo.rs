use catalog_core::{
    Book, BookCategory, BookRepository, BookService, BookUpdate, CreateBookRequest, ErrorKind,
    MemoryBookRepository, RepoError,
};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let mut repo = MemoryBookRepository::new();

    let book = Book::new(
        "Dune",
        "Desert planet epic",
        1965,
        BookCategory::SciFi,
        vec!["Frank Herbert".to_string()],
    );
    let id = repo.create_book(&book).unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Dune");
    assert_eq!(loaded.year, 1965);
    assert_eq!(loaded.authors, vec!["Frank Herbert".to_string()]);
}

#[test]
fn shared_and_repeated_author_names_deduplicate() {
    let mut repo = MemoryBookRepository::new();

    let first = Book::new(
        "Echoes",
        "same name twice",
        2010,
        BookCategory::Fiction,
        vec!["Ann Leckie".to_string(), "Ann Leckie".to_string()],
    );
    let first_id = repo.create_book(&first).unwrap();
    assert_eq!(repo.author_count(), 1);

    let second = Book::new(
        "Another",
        "shared author",
        2012,
        BookCategory::Fiction,
        vec!["Ann Leckie".to_string()],
    );
    repo.create_book(&second).unwrap();
    assert_eq!(repo.author_count(), 1);

    let loaded = repo.get_book(first_id).unwrap().unwrap();
    assert_eq!(
        loaded.authors,
        vec!["Ann Leckie".to_string(), "Ann Leckie".to_string()]
    );
}

#[test]
fn update_changes_scalars_and_keeps_authors() {
    let mut repo = MemoryBookRepository::new();

    let book = Book::new(
        "Draft",
        "draft",
        1999,
        BookCategory::History,
        vec!["Author One".to_string()],
    );
    let id = repo.create_book(&book).unwrap();

    repo.update_book(
        id,
        &BookUpdate {
            title: "Final".to_string(),
            description: "final".to_string(),
            year: 2000,
        },
    )
    .unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Final");
    assert_eq!(loaded.year, 2000);
    assert_eq!(loaded.category, BookCategory::History);
    assert_eq!(loaded.authors, vec!["Author One".to_string()]);
}

#[test]
fn update_applies_scalar_fields_verbatim() {
    let mut repo = MemoryBookRepository::new();

    let book = Book::new(
        "Keep Me",
        "original",
        2020,
        BookCategory::Fiction,
        vec!["Sole Author".to_string()],
    );
    let id = repo.create_book(&book).unwrap();

    repo.update_book(
        id,
        &BookUpdate {
            title: String::new(),
            description: String::new(),
            year: 0,
        },
    )
    .unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded.title, "");
    assert_eq!(loaded.year, 0);
    assert_eq!(loaded.authors, vec!["Sole Author".to_string()]);
}

#[test]
fn missing_ids_surface_as_not_found() {
    let mut repo = MemoryBookRepository::new();
    let missing = Uuid::new_v4();

    assert!(repo.get_book(missing).unwrap().is_none());
    assert!(matches!(
        repo.delete_book(missing).unwrap_err(),
        RepoError::NotFound(id) if id == missing
    ));
    assert!(matches!(
        repo.update_book(
            missing,
            &BookUpdate {
                title: "x".to_string(),
                description: String::new(),
                year: 2024,
            }
        )
        .unwrap_err(),
        RepoError::NotFound(id) if id == missing
    ));
}

#[test]
fn delete_keeps_author_records() {
    let mut repo = MemoryBookRepository::new();

    let book = Book::new(
        "Orphan Maker",
        "",
        2015,
        BookCategory::Fantasy,
        vec!["Lone Author".to_string()],
    );
    let id = repo.create_book(&book).unwrap();
    repo.delete_book(id).unwrap();

    assert!(repo.get_book(id).unwrap().is_none());
    assert_eq!(repo.author_count(), 1);
}

// The service is generic over the repository trait; the double slots in
// exactly where the SQLite repository does.
#[test]
fn service_runs_against_memory_double() {
    let mut service = BookService::new(MemoryBookRepository::new());

    let id = service
        .create_book(&CreateBookRequest {
            title: "Dune".to_string(),
            description: "Desert planet epic".to_string(),
            year: 1965,
            category: BookCategory::SciFi,
            authors: vec!["Frank Herbert".to_string()],
        })
        .unwrap();

    let view = service.get_book(id).unwrap();
    assert_eq!(view.title, "Dune");

    service.delete_book(id).unwrap();
    assert_eq!(service.get_book(id).unwrap_err().kind, ErrorKind::NotFound);
}
