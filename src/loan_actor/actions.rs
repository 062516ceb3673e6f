//! Custom actions for the Loan actor.

use crate::model::BorrowRecord;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum LoanAction {
    /// Marks the loan returned at the given instant.
    Close(DateTime<Utc>),
    /// Clears the return date of a closed loan.
    Reopen,
}

/// Results from LoanActions - variants match 1:1 with LoanAction
#[derive(Debug, Clone, PartialEq)]
pub enum LoanActionResult {
    Close(BorrowRecord),
    Reopen(BorrowRecord),
}
