//! # Book Client
//!
//! Domain-specific API over a `ResourceClient<Book>`.
use crate::book_actor::{BookAction, BookActionResult, BookError};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Book, BookCreate, BookId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Book actor.
#[derive(Clone)]
pub struct BookClient {
    inner: ResourceClient<Book>,
}

impl BookClient {
    pub fn new(inner: ResourceClient<Book>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Book> for BookClient {
    type Error = BookError;

    fn inner(&self) -> &ResourceClient<Book> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<BookError>() {
                Ok(book_error) => *book_error,
                Err(other) => BookError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::Conflict(isbn) => BookError::DuplicateIsbn(isbn),
            FrameworkError::NotFound(id) => BookError::NotFound(id),
            other => BookError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl BookClient {
    #[instrument(skip(self))]
    pub async fn create_book(&self, params: BookCreate) -> Result<BookId, BookError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Returns the number of copies currently on the shelf.
    #[instrument(skip(self))]
    pub async fn check_availability(&self, id: BookId) -> Result<u32, BookError> {
        match self
            .inner
            .perform_action(id, BookAction::CheckAvailability)
            .await
            .map_err(Self::map_error)?
        {
            BookActionResult::CheckAvailability(available) => Ok(available),
            other => Err(BookError::ActorCommunicationError(format!(
                "unexpected reply to CheckAvailability: {:?}",
                other
            ))),
        }
    }

    /// Applies `delta` to the available count and returns the new count.
    ///
    /// The actor rejects the change if it would leave `0..=total_copies`.
    #[instrument(skip(self))]
    pub async fn adjust_availability(&self, id: BookId, delta: i32) -> Result<u32, BookError> {
        debug!(delta, "Adjusting availability");
        match self
            .inner
            .perform_action(id, BookAction::AdjustAvailability(delta))
            .await
            .map_err(Self::map_error)?
        {
            BookActionResult::AdjustAvailability(available) => Ok(available),
            other => Err(BookError::ActorCommunicationError(format!(
                "unexpected reply to AdjustAvailability: {:?}",
                other
            ))),
        }
    }
}
