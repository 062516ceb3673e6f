//! [`ActorEntity`] implementation for [`Book`].

use crate::book_actor::{BookAction, BookActionResult, BookError};
use crate::framework::ActorEntity;
use crate::model::{Book, BookCreate, BookId};
use async_trait::async_trait;

impl Book {
    fn adjust_availability(&mut self, delta: i32) -> Result<u32, BookError> {
        let next = i64::from(self.available_copies) + i64::from(delta);
        if next < 0 {
            return Err(BookError::NoCopiesAvailable {
                requested: delta.unsigned_abs(),
                available: self.available_copies,
            });
        }
        if next > i64::from(self.total_copies) {
            return Err(BookError::AvailabilityOverflow {
                returned: delta.unsigned_abs(),
                available: self.available_copies,
                total: self.total_copies,
            });
        }
        // 0 <= next <= total_copies, which is a u32
        self.available_copies = next as u32;
        Ok(self.available_copies)
    }
}

#[async_trait]
impl ActorEntity for Book {
    type Id = BookId;
    type Create = BookCreate;
    type Action = BookAction;
    type ActionResult = BookActionResult;
    type Error = BookError;

    fn from_create_params(id: BookId, params: BookCreate) -> Result<Self, BookError> {
        if params.total_copies == 0 {
            return Err(BookError::NoCopies);
        }
        Ok(Book::new(
            id,
            params.title,
            params.author,
            params.isbn,
            params.total_copies,
        ))
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.isbn.clone())
    }

    async fn handle_action(
        &mut self,
        action: BookAction,
    ) -> Result<BookActionResult, BookError> {
        match action {
            BookAction::CheckAvailability => {
                Ok(BookActionResult::CheckAvailability(self.available_copies))
            }
            BookAction::AdjustAvailability(delta) => self
                .adjust_availability(delta)
                .map(BookActionResult::AdjustAvailability),
        }
    }
}
