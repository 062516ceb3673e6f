//! # Loan Client
//!
//! Domain-specific API over a `ResourceClient<BorrowRecord>`.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::loan_actor::{LoanAction, LoanActionResult, LoanError};
use crate::model::{BookId, BorrowCreate, BorrowRecord, LoanId, PatronId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Loan actor.
#[derive(Clone)]
pub struct LoanClient {
    inner: ResourceClient<BorrowRecord>,
}

impl LoanClient {
    pub fn new(inner: ResourceClient<BorrowRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<BorrowRecord> for LoanClient {
    type Error = LoanError;

    fn inner(&self) -> &ResourceClient<BorrowRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<LoanError>() {
                Ok(loan_error) => *loan_error,
                Err(other) => LoanError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::NotFound(id) => LoanError::NotFound(id),
            other => LoanError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl LoanClient {
    #[instrument(skip(self))]
    pub async fn open_loan(&self, params: BorrowCreate) -> Result<LoanId, LoanError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Active records of one patron, oldest first.
    #[instrument(skip(self))]
    pub async fn active_loans_for(&self, patron: &PatronId) -> Result<Vec<BorrowRecord>, LoanError> {
        let mut records = self.list().await?;
        records.retain(|r| r.is_active() && &r.patron_id == patron);
        Ok(records)
    }

    /// The patron's active record for `book`, if there is one.
    pub async fn active_loan(
        &self,
        patron: &PatronId,
        book: BookId,
    ) -> Result<Option<BorrowRecord>, LoanError> {
        Ok(self
            .active_loans_for(patron)
            .await?
            .into_iter()
            .find(|r| r.book_id == book))
    }

    #[instrument(skip(self))]
    pub async fn close_loan(
        &self,
        id: LoanId,
        returned_at: DateTime<Utc>,
    ) -> Result<BorrowRecord, LoanError> {
        match self
            .inner
            .perform_action(id, LoanAction::Close(returned_at))
            .await
            .map_err(Self::map_error)?
        {
            LoanActionResult::Close(record) => Ok(record),
            other => Err(LoanError::ActorCommunicationError(format!(
                "unexpected reply to Close: {:?}",
                other
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn reopen_loan(&self, id: LoanId) -> Result<BorrowRecord, LoanError> {
        match self
            .inner
            .perform_action(id, LoanAction::Reopen)
            .await
            .map_err(Self::map_error)?
        {
            LoanActionResult::Reopen(record) => Ok(record),
            other => Err(LoanError::ActorCommunicationError(format!(
                "unexpected reply to Reopen: {:?}",
                other
            ))),
        }
    }
}
