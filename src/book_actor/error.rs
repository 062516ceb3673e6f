//! Error types for the Book actor.

use thiserror::Error;

/// Errors that can occur during book operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookError {
    /// The requested book was not found.
    #[error("Book not found: {0}")]
    NotFound(String),

    /// A book must be registered with at least one copy.
    #[error("Total copies must be a positive integer")]
    NoCopies,

    /// Another book already uses this ISBN.
    #[error("A book with ISBN {0} already exists")]
    DuplicateIsbn(String),

    /// The adjustment would take availability below zero.
    #[error("No copies available: requested {requested}, available {available}")]
    NoCopiesAvailable { requested: u32, available: u32 },

    /// The adjustment would put more copies on the shelf than exist.
    #[error("Availability overflow: {available} + {returned} exceeds {total} copies")]
    AvailabilityOverflow {
        returned: u32,
        available: u32,
        total: u32,
    },

    /// An error occurred while communicating with the actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
