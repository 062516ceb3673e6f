//! Borrow and return workflows.
//!
//! Each workflow is a short saga over two single-record writes. When the
//! second write fails the first is undone:
//!
//! | Workflow | Step 1 | Step 2 | Compensation |
//! |---|---|---|---|
//! | borrow | insert borrow record | availability `-1` | remove record |
//! | return | close borrow record | availability `+1` | reopen record |

use super::fees::{FeeAssessment, FeeSchedule};
use super::Outcome;
use crate::clock::Clock;
use crate::config::LendingPolicy;
use crate::model::{Book, BookId, BorrowCreate, BorrowRecord, LoanId, PatronId, PatronIdError};
use crate::store::{LibraryStore, StoreError};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Reasons a borrow or return is refused. `Display` is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LendingError {
    #[error(transparent)]
    InvalidPatron(#[from] PatronIdError),

    #[error("Book not found.")]
    BookNotFound(BookId),

    #[error("This book is currently not available.")]
    NotAvailable(BookId),

    #[error("You have reached the maximum borrowing limit of {limit} books.")]
    LimitReached { limit: usize },

    #[error("This book was not borrowed by the patron.")]
    NotBorrowed,

    #[error("Database error occurred while reading library records.")]
    Lookup(#[source] StoreError),

    #[error("Database error occurred while creating borrow record.")]
    RecordWrite(#[source] StoreError),

    #[error("Database error occurred while closing borrow record.")]
    ReturnWrite(#[source] StoreError),

    #[error("Database error occurred while updating book availability.")]
    AvailabilityWrite(#[source] StoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorrowReceipt {
    pub loan_id: LoanId,
    pub book: Book,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnReceipt {
    pub record: BorrowRecord,
    pub fee: FeeAssessment,
}

impl ReturnReceipt {
    fn message(&self) -> String {
        if self.fee.days_overdue > 0 {
            format!(
                "Returned. Late by {} days. Fee ${:.2}",
                self.fee.days_overdue, self.fee.fee_amount
            )
        } else {
            "Returned. Late fee $0.00".to_string()
        }
    }
}

#[derive(Clone)]
pub struct LendingCoordinator {
    store: Arc<dyn LibraryStore>,
    clock: Arc<dyn Clock>,
    policy: LendingPolicy,
    fees: FeeSchedule,
}

impl LendingCoordinator {
    pub fn new(store: Arc<dyn LibraryStore>, clock: Arc<dyn Clock>, policy: LendingPolicy) -> Self {
        let fees = FeeSchedule::from_policy(&policy);
        Self {
            store,
            clock,
            policy,
            fees,
        }
    }

    pub async fn borrow(&self, patron_id: &str, book_id: BookId) -> Outcome {
        self.try_borrow(patron_id, book_id)
            .await
            .map(|receipt| {
                format!(
                    "Successfully borrowed \"{}\". Due date: {}.",
                    receipt.book.title,
                    receipt.due_date.format("%Y-%m-%d")
                )
            })
            .into()
    }

    /// Lends one copy of `book_id` to the patron.
    ///
    /// Checks run in order and the first failure wins: patron id shape, book
    /// exists, a copy is on the shelf, borrow limit. The record is then written
    /// and the copy taken off the shelf; if that last step fails the record
    /// is removed again.
    pub async fn try_borrow(&self, patron_id: &str, book_id: BookId) -> Result<BorrowReceipt, LendingError> {
        let patron = PatronId::parse(patron_id)?;

        let book = self
            .store
            .find_book_by_id(book_id)
            .await
            .map_err(LendingError::Lookup)?
            .ok_or(LendingError::BookNotFound(book_id))?;
        if !book.is_available() {
            warn!(%book_id, "No copies available");
            return Err(LendingError::NotAvailable(book_id));
        }

        let held = self
            .store
            .count_active_borrows_for_patron(&patron)
            .await
            .map_err(LendingError::Lookup)?;
        if held > self.policy.borrow_limit {
            warn!(%patron, held, limit = self.policy.borrow_limit, "Borrow limit reached");
            return Err(LendingError::LimitReached {
                limit: self.policy.borrow_limit,
            });
        }

        let borrow_date = self.clock.now();
        let due_date = Duration::try_days(self.policy.loan_period_days)
            .and_then(|period| borrow_date.checked_add_signed(period))
            .ok_or_else(|| {
                LendingError::RecordWrite(StoreError::InvalidRecord(format!(
                    "loan period of {} days is out of range",
                    self.policy.loan_period_days
                )))
            })?;

        let loan_id = self
            .store
            .insert_borrow_record(BorrowCreate {
                patron_id: patron.clone(),
                book_id,
                borrow_date,
                due_date,
            })
            .await
            .map_err(LendingError::RecordWrite)?;

        if let Err(e) = self.store.adjust_book_availability(book_id, -1).await {
            warn!(%loan_id, error = %e, "Availability update failed, removing borrow record");
            if let Err(undo) = self.store.remove_borrow_record(loan_id).await {
                error!(%loan_id, error = %undo, "Failed to remove borrow record");
            }
            return Err(match e {
                // Another patron took the last copy after our availability check.
                StoreError::AvailabilityRejected { .. } => LendingError::NotAvailable(book_id),
                other => LendingError::AvailabilityWrite(other),
            });
        }

        info!(%patron, %book_id, %loan_id, due = %due_date.date_naive(), "Book borrowed");
        Ok(BorrowReceipt {
            loan_id,
            book,
            due_date,
        })
    }

    pub async fn return_book(&self, patron_id: &str, book_id: BookId) -> Outcome {
        self.try_return(patron_id, book_id)
            .await
            .map(|receipt| receipt.message())
            .into()
    }

    /// Closes the patron's active loan of `book_id` and puts the copy back.
    ///
    /// The fee is assessed against the record's due date at the moment of
    /// return. If the copy cannot be put back the record is reopened.
    pub async fn try_return(&self, patron_id: &str, book_id: BookId) -> Result<ReturnReceipt, LendingError> {
        let patron = PatronId::parse(patron_id)?;

        let record = self
            .active_record(&patron, book_id)
            .await
            .map_err(LendingError::Lookup)?
            .ok_or(LendingError::NotBorrowed)?;

        let returned_at = self.clock.now();
        let fee = self.fees.fee_for(record.due_date, returned_at);

        let closed = self
            .store
            .close_borrow_record(&patron, book_id, returned_at)
            .await
            .map_err(|e| match e {
                StoreError::NoActiveRecord { .. } => LendingError::NotBorrowed,
                other => LendingError::ReturnWrite(other),
            })?;

        if let Err(e) = self.store.adjust_book_availability(book_id, 1).await {
            warn!(loan_id = %closed.id, error = %e, "Availability update failed, reopening borrow record");
            if let Err(undo) = self.store.reopen_borrow_record(closed.id).await {
                error!(loan_id = %closed.id, error = %undo, "Failed to reopen borrow record");
            }
            return Err(LendingError::AvailabilityWrite(e));
        }

        info!(%patron, %book_id, days_overdue = fee.days_overdue, fee = fee.fee_amount, "Book returned");
        Ok(ReturnReceipt { record: closed, fee })
    }

    /// Fee the patron would owe for `book_id` if they returned it now.
    ///
    /// A patron with no active loan of the book owes nothing, as does a
    /// malformed patron id.
    pub async fn late_fee_for(&self, patron_id: &str, book_id: BookId) -> Result<FeeAssessment, StoreError> {
        let Ok(patron) = PatronId::parse(patron_id) else {
            return Ok(FeeAssessment::NONE);
        };
        let due = self
            .active_record(&patron, book_id)
            .await?
            .map(|record| record.due_date);
        Ok(self.fees.assess(due, self.clock.now()))
    }

    async fn active_record(&self, patron: &PatronId, book_id: BookId) -> Result<Option<BorrowRecord>, StoreError> {
        Ok(self
            .store
            .list_active_borrows_for_patron(patron)
            .await?
            .into_iter()
            .find(|record| record.book_id == book_id))
    }
}
