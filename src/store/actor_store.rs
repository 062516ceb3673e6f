//! [`LibraryStore`] backed by the book and loan actors.

use super::{LibraryStore, StoreError};
use crate::book_actor::BookError;
use crate::clients::{ActorClient, BookClient, LoanClient};
use crate::loan_actor::LoanError;
use crate::model::{Book, BookCreate, BookId, BorrowCreate, BorrowRecord, LoanId, PatronId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

/// Store that delegates to a [`BookClient`] and a [`LoanClient`].
///
/// Per-book linearizability comes from the book actor: availability changes
/// are applied one at a time by the task that owns the book.
#[derive(Clone)]
pub struct ActorStore {
    books: BookClient,
    loans: LoanClient,
}

impl ActorStore {
    pub fn new(books: BookClient, loans: LoanClient) -> Self {
        Self { books, loans }
    }
}

impl From<BookError> for StoreError {
    fn from(e: BookError) -> Self {
        match e {
            BookError::DuplicateIsbn(isbn) => StoreError::DuplicateIsbn(isbn),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

impl From<LoanError> for StoreError {
    fn from(e: LoanError) -> Self {
        match e {
            LoanError::InvalidDueDate => StoreError::InvalidRecord(e.to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
impl LibraryStore for ActorStore {
    async fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.books.get(id).await?)
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        Ok(self
            .books
            .list()
            .await?
            .into_iter()
            .find(|b| b.isbn == isbn))
    }

    async fn count_active_borrows_for_patron(&self, patron: &PatronId) -> Result<usize, StoreError> {
        Ok(self.loans.active_loans_for(patron).await?.len())
    }

    async fn insert_book(&self, book: BookCreate) -> Result<BookId, StoreError> {
        Ok(self.books.create_book(book).await?)
    }

    async fn insert_borrow_record(&self, record: BorrowCreate) -> Result<LoanId, StoreError> {
        Ok(self.loans.open_loan(record).await?)
    }

    #[instrument(skip(self))]
    async fn adjust_book_availability(&self, id: BookId, delta: i32) -> Result<u32, StoreError> {
        self.books
            .adjust_availability(id, delta)
            .await
            .map_err(|e| match e {
                BookError::NotFound(_) => StoreError::BookNotFound(id),
                BookError::NoCopiesAvailable { .. } | BookError::AvailabilityOverflow { .. } => {
                    StoreError::AvailabilityRejected {
                        book_id: id,
                        delta,
                        reason: e.to_string(),
                    }
                }
                other => other.into(),
            })
    }

    #[instrument(skip(self))]
    async fn close_borrow_record(
        &self,
        patron: &PatronId,
        book: BookId,
        returned_at: DateTime<Utc>,
    ) -> Result<BorrowRecord, StoreError> {
        let record = self
            .loans
            .active_loan(patron, book)
            .await?
            .ok_or_else(|| StoreError::NoActiveRecord {
                patron_id: patron.clone(),
                book_id: book,
            })?;

        // A concurrent return may have closed it in between; the actor then
        // answers AlreadyClosed.
        self.loans
            .close_loan(record.id, returned_at)
            .await
            .map_err(|e| match e {
                LoanError::AlreadyClosed(_) => StoreError::NoActiveRecord {
                    patron_id: patron.clone(),
                    book_id: book,
                },
                other => other.into(),
            })
    }

    async fn list_all_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.list().await?)
    }

    async fn list_active_borrows_for_patron(
        &self,
        patron: &PatronId,
    ) -> Result<Vec<BorrowRecord>, StoreError> {
        Ok(self.loans.active_loans_for(patron).await?)
    }

    async fn remove_borrow_record(&self, id: LoanId) -> Result<(), StoreError> {
        self.loans.delete(id).await.map_err(|e| match e {
            LoanError::NotFound(_) => StoreError::RecordNotFound(id),
            other => other.into(),
        })
    }

    async fn reopen_borrow_record(&self, id: LoanId) -> Result<(), StoreError> {
        match self.loans.reopen_loan(id).await {
            Ok(_) => Ok(()),
            Err(LoanError::NotFound(_)) => Err(StoreError::RecordNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }
}
