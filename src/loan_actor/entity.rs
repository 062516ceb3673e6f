//! [`ActorEntity`] implementation for [`BorrowRecord`].

use crate::framework::ActorEntity;
use crate::loan_actor::{LoanAction, LoanActionResult, LoanError};
use crate::model::{BorrowCreate, BorrowRecord, LoanId};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for BorrowRecord {
    type Id = LoanId;
    type Create = BorrowCreate;
    type Action = LoanAction;
    type ActionResult = LoanActionResult;
    type Error = LoanError;

    fn from_create_params(id: LoanId, params: BorrowCreate) -> Result<Self, LoanError> {
        if params.due_date <= params.borrow_date {
            return Err(LoanError::InvalidDueDate);
        }
        Ok(Self {
            id,
            patron_id: params.patron_id,
            book_id: params.book_id,
            borrow_date: params.borrow_date,
            due_date: params.due_date,
            return_date: None,
        })
    }

    async fn handle_action(
        &mut self,
        action: LoanAction,
    ) -> Result<LoanActionResult, LoanError> {
        match action {
            LoanAction::Close(returned_at) => {
                if !self.is_active() {
                    return Err(LoanError::AlreadyClosed(self.id.to_string()));
                }
                self.return_date = Some(returned_at);
                Ok(LoanActionResult::Close(self.clone()))
            }
            LoanAction::Reopen => {
                if self.is_active() {
                    return Err(LoanError::StillActive(self.id.to_string()));
                }
                self.return_date = None;
                Ok(LoanActionResult::Reopen(self.clone()))
            }
        }
    }
}
