use crate::clients::{BookClient, LoanClient};
use crate::clock::{Clock, SystemClock};
use crate::config::LibraryConfig;
use crate::lending::{CatalogManager, FeeSchedule, LendingCoordinator, PatronStatusReporter};
use crate::store::{ActorStore, LibraryStore};
use std::sync::Arc;
use tracing::{error, info};

/// Starts the book and loan actors and wires the lending services to them.
///
/// Every service shares one [`ActorStore`], so all availability changes for a
/// book go through the same actor.
///
/// # Example
///
/// ```ignore
/// let system = LibrarySystem::new(LibraryConfig::default());
///
/// system.catalog.add_book("Clean Code", "R. Martin", "8000000000000", 2).await;
/// let outcome = system.lending.borrow("123456", BookId(1)).await;
/// let report = system.status.status_for("123456").await?;
///
/// system.shutdown().await?;
/// ```
pub struct LibrarySystem {
    pub catalog: CatalogManager,
    pub lending: LendingCoordinator,
    pub status: PatronStatusReporter,

    /// Direct access to the book actor.
    pub book_client: BookClient,
    /// Direct access to the loan actor.
    pub loan_client: LoanClient,

    store: Arc<dyn LibraryStore>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl LibrarySystem {
    /// Starts a system on the wall clock. Must be called inside a Tokio runtime.
    pub fn new(config: LibraryConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: LibraryConfig, clock: Arc<dyn Clock>) -> Self {
        let (book_actor, books) = crate::book_actor::new(config.actor_buffer);
        let (loan_actor, loans) = crate::loan_actor::new(config.actor_buffer);

        let book_handle = tokio::spawn(book_actor.run());
        let loan_handle = tokio::spawn(loan_actor.run());

        let book_client = BookClient::new(books);
        let loan_client = LoanClient::new(loans);
        let store: Arc<dyn LibraryStore> =
            Arc::new(ActorStore::new(book_client.clone(), loan_client.clone()));

        let policy = config.policy;
        info!(
            loan_period_days = policy.loan_period_days,
            borrow_limit = policy.borrow_limit,
            "Library system started"
        );

        Self {
            catalog: CatalogManager::new(store.clone()),
            status: PatronStatusReporter::new(
                store.clone(),
                clock.clone(),
                FeeSchedule::from_policy(&policy),
            ),
            lending: LendingCoordinator::new(store.clone(), clock, policy),
            book_client,
            loan_client,
            store,
            handles: vec![book_handle, loan_handle],
        }
    }

    /// The store the services share.
    pub fn store(&self) -> Arc<dyn LibraryStore> {
        self.store.clone()
    }

    /// Closes every client and waits for the actors to drain and stop.
    ///
    /// Actors exit once the last sender for their channel is gone, so each
    /// service (which holds a store clone) is dropped along with the clients.
    /// Store handles obtained through [`LibrarySystem::store`] must be dropped
    /// first or the actors keep running.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down library system...");

        drop(self.catalog);
        drop(self.lending);
        drop(self.status);
        drop(self.store);
        drop(self.book_client);
        drop(self.loan_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Library system shutdown complete.");
        Ok(())
    }
}
