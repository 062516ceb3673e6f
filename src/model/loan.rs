//! A single borrowing of one book by one patron.
//!
//! # Actor Framework
//! [`BorrowRecord`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! so it can be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`crate::loan_actor`] for the close/reopen actions.
use crate::model::{BookId, PatronId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for borrow records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(pub u32);

impl From<u32> for LoanId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "loan_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: LoanId,
    pub patron_id: PatronId,
    pub book_id: BookId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// `None` while the loan is active.
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// Active record of `patron` for `book`.
    pub fn is_active_for(&self, patron: &PatronId, book: BookId) -> bool {
        self.is_active() && &self.patron_id == patron && self.book_id == book
    }
}

/// Payload for opening a new borrow record.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowCreate {
    pub patron_id: PatronId,
    pub book_id: BookId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}
