//! # Persistence Contract
//!
//! [`LibraryStore`] is everything the lending services need from storage.
//! Services receive it as an injected `Arc<dyn LibraryStore>`; nothing in the
//! crate reaches for a global store.
//!
//! Writes report success as `Ok`. Each write touches a single record, and the
//! services compose them into workflows with explicit compensation
//! ([`LibraryStore::remove_borrow_record`], [`LibraryStore::reopen_borrow_record`]).

mod actor_store;

pub use actor_store::ActorStore;

use crate::model::{Book, BookCreate, BookId, BorrowCreate, BorrowRecord, LoanId, PatronId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures reported by a [`LibraryStore`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("{0} not found")]
    BookNotFound(BookId),

    #[error("a book with ISBN {0} already exists")]
    DuplicateIsbn(String),

    /// The availability change would break `0 <= available <= total`.
    #[error("availability of {book_id} cannot change by {delta}: {reason}")]
    AvailabilityRejected {
        book_id: BookId,
        delta: i32,
        reason: String,
    },

    #[error("no active borrow record for patron {patron_id} and {book_id}")]
    NoActiveRecord { patron_id: PatronId, book_id: BookId },

    #[error("{0} not found")]
    RecordNotFound(LoanId),

    #[error("record rejected: {0}")]
    InvalidRecord(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError>;

    async fn count_active_borrows_for_patron(&self, patron: &PatronId) -> Result<usize, StoreError>;

    /// Stores a new book with every copy available.
    async fn insert_book(&self, book: BookCreate) -> Result<BookId, StoreError>;

    async fn insert_borrow_record(&self, record: BorrowCreate) -> Result<LoanId, StoreError>;

    /// Applies `delta` to the book's available count and returns the new count.
    ///
    /// Must be linearizable per book: of two concurrent `-1` adjustments on the
    /// last copy, exactly one succeeds.
    async fn adjust_book_availability(&self, id: BookId, delta: i32) -> Result<u32, StoreError>;

    /// Sets the return date on the patron's active record for the book.
    async fn close_borrow_record(
        &self,
        patron: &PatronId,
        book: BookId,
        returned_at: DateTime<Utc>,
    ) -> Result<BorrowRecord, StoreError>;

    async fn list_all_books(&self) -> Result<Vec<Book>, StoreError>;

    async fn list_active_borrows_for_patron(
        &self,
        patron: &PatronId,
    ) -> Result<Vec<BorrowRecord>, StoreError>;

    /// Deletes a record. Used to undo a borrow that could not complete.
    async fn remove_borrow_record(&self, id: LoanId) -> Result<(), StoreError>;

    /// Clears a record's return date. Used to undo a return that could not complete.
    async fn reopen_borrow_record(&self, id: LoanId) -> Result<(), StoreError>;
}
