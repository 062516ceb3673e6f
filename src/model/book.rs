//! A catalogued title and its copy counts.
//!
//! # Actor Framework
//! [`Book`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! so it can be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`crate::book_actor`] for:
//! - Creation parameters ([`BookCreate`])
//! - Availability actions ([`BookAction`](crate::book_actor::BookAction))
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub u32);

impl From<u32> for BookId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "book_{}", self.0)
    }
}

/// Invariant: `available_copies <= total_copies`, and `total_copies > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl Book {
    /// Creates a Book with every copy on the shelf.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        total_copies: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            total_copies,
            available_copies: total_copies,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

/// Payload for registering a new book. Fields are expected to be validated
/// and trimmed already.
#[derive(Debug, Clone, PartialEq)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: u32,
}
