//! # Lending Services
//!
//! Business rules over an injected [`LibraryStore`](crate::store::LibraryStore):
//!
//! - [`CatalogManager`] - Book registration and search
//! - [`LendingCoordinator`] - Borrow and return workflows
//! - [`fees`] - Late-fee arithmetic
//! - [`PatronStatusReporter`] - Active loans and fees owed per patron
//!
//! Registration, borrow and return report an [`Outcome`]; each also has a
//! `try_` form returning a typed error whose `Display` is the outcome message.

pub mod catalog;
pub mod coordinator;
pub mod fees;
mod outcome;
pub mod status;

pub use catalog::{CatalogError, CatalogManager, SearchType};
pub use coordinator::{BorrowReceipt, LendingCoordinator, LendingError, ReturnReceipt};
pub use fees::{fee_for, FeeAssessment, FeeSchedule, FeeStatus};
pub use outcome::Outcome;
pub use status::{CurrentLoan, PatronStatus, PatronStatusReporter};
