//! Custom actions for the Book actor.

/// Availability operations on a [`Book`](crate::model::Book).
#[derive(Debug, Clone, PartialEq)]
pub enum BookAction {
    /// Reads the current number of copies on the shelf.
    CheckAvailability,
    /// Adds `delta` to `available_copies` (negative to lend, positive to return).
    ///
    /// # Errors
    /// Fails without changing the book if the result would leave
    /// `0..=total_copies`.
    AdjustAvailability(i32),
}

/// Results from BookActions - variants match 1:1 with BookAction
#[derive(Debug, Clone, PartialEq)]
pub enum BookActionResult {
    CheckAvailability(u32),
    /// The new available count.
    AdjustAvailability(u32),
}
