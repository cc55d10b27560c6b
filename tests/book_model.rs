use catalog_core::{Book, BookCategory, BookValidationError};

fn valid_book() -> Book {
    Book::new(
        "Dune",
        "Desert planet epic",
        1965,
        BookCategory::SciFi,
        vec!["Frank Herbert".to_string()],
    )
}

#[test]
fn new_book_gets_a_fresh_id() {
    let first = valid_book();
    let second = valid_book();
    assert_ne!(first.uuid, second.uuid);
}

#[test]
fn valid_book_passes_validation() {
    assert!(valid_book().validate().is_ok());
}

#[test]
fn whitespace_title_is_rejected() {
    let mut book = valid_book();
    book.title = "   ".to_string();
    assert_eq!(book.validate(), Err(BookValidationError::EmptyTitle));
}

#[test]
fn empty_author_list_is_rejected() {
    let mut book = valid_book();
    book.authors.clear();
    assert_eq!(book.validate(), Err(BookValidationError::NoAuthors));
}

#[test]
fn blank_author_name_is_rejected_with_position() {
    let mut book = valid_book();
    book.authors.push("  ".to_string());
    assert_eq!(
        book.validate(),
        Err(BookValidationError::EmptyAuthorName { position: 1 })
    );
}
