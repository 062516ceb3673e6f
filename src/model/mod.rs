//! Plain data types stored by the lending actors.

pub mod book;
pub mod loan;
pub mod patron;

pub use book::*;
pub use loan::*;
pub use patron::*;
