//! # Loan Actor
//!
//! Owns every [`BorrowRecord`]. Records are opened on borrow, closed on
//! return, and can be deleted or reopened when a lending workflow has to be
//! compensated.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::BorrowRecord;

/// Creates a new Loan actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<BorrowRecord>, ResourceClient<BorrowRecord>) {
    ResourceActor::new(buffer_size)
}
