//! Per-patron loan and fee report.

use super::fees::FeeSchedule;
use crate::clock::Clock;
use crate::model::{BookId, BorrowRecord, PatronId};
use crate::store::{LibraryStore, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentLoan {
    pub book_id: BookId,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatronStatus {
    /// Active loans in store order.
    pub currently_borrowed: Vec<CurrentLoan>,
    /// Closed loans. Not retained yet, so always empty.
    pub history: Vec<BorrowRecord>,
    pub books_borrowed_count: usize,
    /// Sum of the capped per-book fees as of now.
    pub total_late_fees: f64,
}

impl PatronStatus {
    pub fn empty() -> Self {
        Self {
            currently_borrowed: Vec::new(),
            history: Vec::new(),
            books_borrowed_count: 0,
            total_late_fees: 0.0,
        }
    }
}

#[derive(Clone)]
pub struct PatronStatusReporter {
    store: Arc<dyn LibraryStore>,
    clock: Arc<dyn Clock>,
    fees: FeeSchedule,
}

impl PatronStatusReporter {
    pub fn new(store: Arc<dyn LibraryStore>, clock: Arc<dyn Clock>, fees: FeeSchedule) -> Self {
        Self { store, clock, fees }
    }

    pub async fn status_for(&self, patron_id: &str) -> Result<PatronStatus, StoreError> {
        let Ok(patron) = PatronId::parse(patron_id) else {
            return Ok(PatronStatus::empty());
        };

        let active = self.store.list_active_borrows_for_patron(&patron).await?;
        let now = self.clock.now();

        let total_late_fees: f64 = active
            .iter()
            .map(|record| self.fees.fee_for(record.due_date, now).fee_amount)
            .sum();
        let currently_borrowed: Vec<CurrentLoan> = active
            .into_iter()
            .map(|record| CurrentLoan {
                book_id: record.book_id,
                due_date: record.due_date,
            })
            .collect();

        debug!(%patron, loans = currently_borrowed.len(), total_late_fees, "Status computed");
        Ok(PatronStatus {
            books_borrowed_count: currently_borrowed.len(),
            currently_borrowed,
            history: Vec::new(),
            total_late_fees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::lending::test_support::{actor_store, day, mock_store};
    use crate::model::Book;
    use crate::model::BorrowCreate;
    use chrono::Duration;

    async fn lend(store: &Arc<dyn LibraryStore>, patron: &PatronId, book: u32, due: DateTime<Utc>) {
        store
            .insert_borrow_record(BorrowCreate {
                patron_id: patron.clone(),
                book_id: BookId(book),
                borrow_date: due - Duration::days(14),
                due_date: due,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fees_are_capped_per_book_then_summed() {
        let store = actor_store();
        let today = day(2024, 6, 30);
        let reporter = PatronStatusReporter::new(
            store.clone(),
            Arc::new(ManualClock::new(today)),
            FeeSchedule::default(),
        );
        let patron = PatronId::parse("123456").unwrap();

        lend(&store, &patron, 1, today - Duration::days(10)).await;
        lend(&store, &patron, 2, today - Duration::days(40)).await;
        lend(&store, &patron, 3, today + Duration::days(5)).await;

        let status = reporter.status_for("123456").await.unwrap();
        assert_eq!(status.books_borrowed_count, 3);
        assert_eq!(status.currently_borrowed.len(), status.books_borrowed_count);
        assert_eq!(status.currently_borrowed[0].book_id, BookId(1));
        assert_eq!(status.total_late_fees, 20.0);
        assert!(status.history.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_patrons_are_empty() {
        let reporter = PatronStatusReporter::new(
            actor_store(),
            Arc::new(ManualClock::new(day(2024, 6, 30))),
            FeeSchedule::default(),
        );
        assert_eq!(reporter.status_for("999999").await.unwrap(), PatronStatus::empty());
        assert_eq!(reporter.status_for("abc").await.unwrap(), PatronStatus::empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let books = MockClient::<Book>::new();
        let mut loans = MockClient::<BorrowRecord>::new();
        loans.expect_list().return_err(FrameworkError::ActorClosed);

        let reporter = PatronStatusReporter::new(
            mock_store(&books, &loans),
            Arc::new(ManualClock::new(day(2024, 6, 30))),
            FeeSchedule::default(),
        );
        let result = reporter.status_for("123456").await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
        loans.verify();
    }
}
