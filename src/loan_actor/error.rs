//! Error types for the Loan actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoanError {
    #[error("Borrow record not found: {0}")]
    NotFound(String),

    /// The due date must come after the borrow date.
    #[error("Due date must be after the borrow date")]
    InvalidDueDate,

    #[error("Borrow record {0} is already closed")]
    AlreadyClosed(String),

    #[error("Borrow record {0} is still active")]
    StillActive(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
