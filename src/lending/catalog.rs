//! Book registration and catalog search.

use super::Outcome;
use crate::model::{Book, BookCreate};
use crate::store::{LibraryStore, StoreError};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

const MAX_TITLE_CHARS: usize = 200;
const MAX_AUTHOR_CHARS: usize = 100;
const ISBN_DIGITS: usize = 13;

/// Reasons a book cannot be added. `Display` is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Title is required.")]
    TitleRequired,

    #[error("Title must be less than 200 characters.")]
    TitleTooLong,

    #[error("Author is required.")]
    AuthorRequired,

    #[error("Author must be less than 100 characters.")]
    AuthorTooLong,

    #[error("ISBN must be exactly 13 digits.")]
    InvalidIsbn,

    #[error("Total copies must be a positive integer.")]
    InvalidCopies,

    #[error("A book with this ISBN already exists.")]
    DuplicateIsbn,

    #[error("Database error occurred while adding the book.")]
    Store(#[source] StoreError),
}

/// Field searched by [`CatalogManager::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Title,
    Author,
    Isbn,
}

impl FromStr for SearchType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SearchType::Title),
            "author" => Ok(SearchType::Author),
            "isbn" => Ok(SearchType::Isbn),
            _ => Err(()),
        }
    }
}

impl SearchType {
    fn matches(self, book: &Book, term: &str) -> bool {
        match self {
            SearchType::Title => contains_ignore_case(&book.title, term),
            SearchType::Author => contains_ignore_case(&book.author, term),
            SearchType::Isbn => book.isbn == term,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn is_isbn(isbn: &str) -> bool {
    isbn.len() == ISBN_DIGITS && isbn.bytes().all(|b| b.is_ascii_digit())
}

/// Validates a registration request, returning the normalised record.
fn validate(
    title: &str,
    author: &str,
    isbn: &str,
    total_copies: i64,
) -> Result<BookCreate, CatalogError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CatalogError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(CatalogError::TitleTooLong);
    }

    let author = author.trim();
    if author.is_empty() {
        return Err(CatalogError::AuthorRequired);
    }
    if author.chars().count() > MAX_AUTHOR_CHARS {
        return Err(CatalogError::AuthorTooLong);
    }

    if !is_isbn(isbn) {
        return Err(CatalogError::InvalidIsbn);
    }

    let total_copies = u32::try_from(total_copies)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(CatalogError::InvalidCopies)?;

    Ok(BookCreate {
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        total_copies,
    })
}

#[derive(Clone)]
pub struct CatalogManager {
    store: Arc<dyn LibraryStore>,
}

impl CatalogManager {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Registers a book with every copy available.
    pub async fn add_book(&self, title: &str, author: &str, isbn: &str, total_copies: i64) -> Outcome {
        self.try_add_book(title, author, isbn, total_copies)
            .await
            .map(|book| format!("Book \"{}\" has been successfully added to the catalog.", book.title))
            .into()
    }

    /// Typed form of [`CatalogManager::add_book`]. Returns the stored book.
    pub async fn try_add_book(
        &self,
        title: &str,
        author: &str,
        isbn: &str,
        total_copies: i64,
    ) -> Result<Book, CatalogError> {
        let params = validate(title, author, isbn, total_copies).inspect_err(|e| {
            warn!(isbn, reason = %e, "Book rejected");
        })?;

        if self
            .store
            .find_book_by_isbn(&params.isbn)
            .await
            .map_err(CatalogError::Store)?
            .is_some()
        {
            warn!(isbn, "Duplicate ISBN");
            return Err(CatalogError::DuplicateIsbn);
        }

        // The store enforces uniqueness too, so a concurrent insert still lands here.
        let id = self
            .store
            .insert_book(params.clone())
            .await
            .map_err(|e| match e {
                StoreError::DuplicateIsbn(_) => CatalogError::DuplicateIsbn,
                other => CatalogError::Store(other),
            })?;

        info!(%id, isbn, title = %params.title, "Book added to catalog");
        Ok(Book::new(id, params.title, params.author, params.isbn, params.total_copies))
    }

    /// Finds books by `"title"`, `"author"` or `"isbn"`.
    ///
    /// Title and author match case-insensitive substrings, ISBN matches
    /// exactly. An unknown search type finds nothing.
    pub async fn search(&self, term: &str, search_type: &str) -> Vec<Book> {
        let Ok(search_type) = search_type.parse::<SearchType>() else {
            return Vec::new();
        };
        let term = term.trim();

        match self.store.list_all_books().await {
            Ok(books) => books
                .into_iter()
                .filter(|book| search_type.matches(book, term))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Catalog search failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::lending::test_support::{actor_store, mock_store};
    use crate::model::{BookId, BorrowRecord};

    #[tokio::test]
    async fn test_add_book_then_find_by_isbn() {
        let store = actor_store();
        let catalog = CatalogManager::new(store.clone());

        let outcome = catalog
            .add_book("  Clean Code ", " R. Martin", "8000000000000", 2)
            .await;
        assert_eq!(
            outcome,
            Outcome::ok("Book \"Clean Code\" has been successfully added to the catalog.")
        );

        let book = store.find_book_by_isbn("8000000000000").await.unwrap().unwrap();
        assert_eq!(book.title, "Clean Code");
        assert_eq!(book.author, "R. Martin");
        assert_eq!(book.total_copies, 2);
        assert_eq!(book.available_copies, 2);
    }

    #[tokio::test]
    async fn test_duplicate_isbn_mentions_exists() {
        let catalog = CatalogManager::new(actor_store());
        assert!(catalog.add_book("Clean Code", "R. Martin", "8000000000000", 2).await.success);

        let again = catalog.add_book("Other Title", "Someone", "8000000000000", 1).await;
        assert!(!again.success);
        assert!(again.message.contains("exists"));
    }

    #[test]
    fn test_validation_order_and_messages() {
        let long_title = "x".repeat(201);
        let long_author = "y".repeat(101);
        let cases = [
            (validate("   ", "", "", 0), "Title is required."),
            (validate(&long_title, "", "", 0), "Title must be less than 200 characters."),
            (validate("T", " ", "", 0), "Author is required."),
            (validate("T", &long_author, "", 0), "Author must be less than 100 characters."),
            (validate("T", "A", "123456789012", 0), "ISBN must be exactly 13 digits."),
            (validate("T", "A", "12345678901a3", 0), "ISBN must be exactly 13 digits."),
            (validate("T", "A", "1234567890123", 0), "Total copies must be a positive integer."),
            (validate("T", "A", "1234567890123", -3), "Total copies must be a positive integer."),
        ];
        for (result, message) in cases {
            assert_eq!(result.unwrap_err().to_string(), message);
        }
    }

    #[test]
    fn test_lengths_are_counted_in_chars() {
        let title = "é".repeat(200);
        assert!(validate(&title, "A", "1234567890123", 1).is_ok());
    }

    #[test]
    fn test_author_length_limit_is_inclusive() {
        let author = "a".repeat(100);
        assert!(validate("T", &author, "1234567890123", 1).is_ok());
        assert_eq!(
            validate("T", &"a".repeat(101), "1234567890123", 1),
            Err(CatalogError::AuthorTooLong)
        );
        assert!(validate("T", &"ü".repeat(100), "1234567890123", 1).is_ok());
    }

    #[test]
    fn test_copy_count_must_fit() {
        assert_eq!(
            validate("T", "A", "1234567890123", i64::from(u32::MAX) + 1),
            Err(CatalogError::InvalidCopies)
        );
    }

    #[tokio::test]
    async fn test_search_modes() {
        let catalog = CatalogManager::new(actor_store());
        catalog.add_book("The Great Gatsby", "F. Scott Fitzgerald", "9780743273565", 3).await;
        catalog.add_book("1984", "George Orwell", "9780451524935", 1).await;

        let by_title = catalog.search("great", "title").await;
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].isbn, "9780743273565");

        assert_eq!(catalog.search("  ORWELL ", "author").await.len(), 1);
        assert_eq!(catalog.search("9780451524935", "isbn").await.len(), 1);
        assert!(catalog.search("978045152493", "isbn").await.is_empty());
        assert!(catalog.search("1984", "genre").await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_failure_is_a_database_error() {
        let mut books = MockClient::<Book>::new();
        let loans = MockClient::<BorrowRecord>::new();
        books.expect_list().return_ok(vec![]);
        books.expect_create().return_err(FrameworkError::ActorClosed);

        let catalog = CatalogManager::new(mock_store(&books, &loans));
        let outcome = catalog.add_book("Clean Code", "R. Martin", "8000000000000", 2).await;
        assert_eq!(
            outcome,
            Outcome::failed("Database error occurred while adding the book.")
        );
        books.verify();
    }

    #[tokio::test]
    async fn test_lookup_failure_is_a_database_error() {
        let mut books = MockClient::<Book>::new();
        let loans = MockClient::<BorrowRecord>::new();
        books.expect_list().return_err(FrameworkError::ActorClosed);

        let catalog = CatalogManager::new(mock_store(&books, &loans));
        let result = catalog.try_add_book("Clean Code", "R. Martin", "8000000000000", 2).await;
        assert!(matches!(result, Err(CatalogError::Store(StoreError::Backend(_)))));
        books.verify();
    }

    #[tokio::test]
    async fn test_search_store_failure_finds_nothing() {
        let mut books = MockClient::<Book>::new();
        let loans = MockClient::<BorrowRecord>::new();
        books.expect_list().return_err(FrameworkError::ActorClosed);
        books
            .expect_list()
            .return_ok(vec![Book::new(BookId(1), "Dune", "Frank Herbert", "9780441013593", 1)]);

        let catalog = CatalogManager::new(mock_store(&books, &loans));
        assert!(catalog.search("dune", "title").await.is_empty());
        assert_eq!(catalog.search("dune", "title").await.len(), 1);
        books.verify();
    }
}
