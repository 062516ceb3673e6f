//! # Core Resource Runtime
//!
//! Generic building blocks for the lending store. Each stored entity type
//! (books, borrow records) lives inside its own [`ResourceActor`], which owns
//! the entities exclusively and applies requests one at a time.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait every stored resource implements.
//! - [`ResourceActor`]: The generic actor that owns a collection of entities.
//! - [`ResourceClient`]: The cloneable handle used to talk to an actor.
//! - [`FrameworkError`]: Runtime errors (closed actor, missing item, key conflict).
//!
//! ## Per-book ordering
//!
//! Every request for a given entity type is serialized through one task. An
//! availability adjustment on a book is therefore linearizable: two borrowers
//! racing for the last copy are applied in some order, and the second one
//! observes `available_copies == 0` and is rejected by the entity itself.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any stored resource must implement to be managed by [`ResourceActor`].
///
/// Associated types keep every request typed: a book actor only accepts
/// `BookCreate` payloads and `BookAction`s, and the compiler rejects anything else.
///
/// [`ActorEntity::unique_key`] is optional and defaults to no key.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier generated by the actor. Ordered so listings come back in
    /// creation order.
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AdjustAvailability`).
    type Action: Send + Sync + Debug;

    /// Result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Per-entity error type, carried back to clients inside
    /// [`FrameworkError::EntityError`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from the generated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// A key that must be unique across the whole store, if the entity has one.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Handle a resource-specific action. Implementations must leave the
    /// entity untouched when they return an error.
    async fn handle_action(
        &mut self,
        action: Self::Action,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the runtime itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unique key already in use: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// One-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a [`ResourceActor`].
///
/// - **Create**: builds a new entity from [`ActorEntity::Create`].
/// - **Get**: fetches the current state by id.
/// - **List**: snapshot of every entity, ordered by id.
/// - **Delete**: removes an entity (used to compensate a failed workflow).
/// - **Action**: runs a custom [`ActorEntity::Action`] against one entity.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns a collection of entities.
///
/// The actor holds the receiving end of the channel and the `store`. It
/// processes one request at a time, so the store needs no `Mutex`.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    fn key_in_use(&self, key: &str) -> bool {
        self.store
            .values()
            .any(|existing| existing.unique_key().as_deref() == Some(key))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        // "Book" instead of "library_lending::model::book::Book"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };

                    if let Some(key) = item.unique_key() {
                        if self.key_in_use(&key) {
                            warn!(entity_type, %key, "Create rejected, key in use");
                            let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                            continue;
                        }
                    }

                    self.next_id += 1;
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.store.remove(&id).is_none() {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    }
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A typed, cloneable handle for sending requests to a [`ResourceActor`].
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: `T` itself does not need to be `Clone` for the sender to be.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u32,
        label: String,
        slots: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
        slots: u32,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Take,
    }

    #[derive(Debug, thiserror::Error)]
    enum ShelfError {
        #[error("shelf must have at least one slot")]
        NoSlots,
        #[error("shelf is empty")]
        Empty,
    }

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = u32;
        type Create = ShelfCreate;
        type Action = ShelfAction;
        type ActionResult = u32;
        type Error = ShelfError;

        fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, ShelfError> {
            if params.slots == 0 {
                return Err(ShelfError::NoSlots);
            }
            Ok(Self {
                id,
                label: params.label,
                slots: params.slots,
            })
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.label.clone())
        }

        async fn handle_action(&mut self, action: ShelfAction) -> Result<u32, ShelfError> {
            match action {
                ShelfAction::Take => {
                    if self.slots == 0 {
                        return Err(ShelfError::Empty);
                    }
                    self.slots -= 1;
                    Ok(self.slots)
                }
            }
        }
    }

    fn shelf(label: &str, slots: u32) -> ShelfCreate {
        ShelfCreate {
            label: label.to_string(),
            slots,
        }
    }

    #[tokio::test]
    async fn test_create_get_list_delete() {
        let (actor, client) = ResourceActor::<Shelf>::new(10);
        tokio::spawn(actor.run());

        let a = client.create(shelf("A", 2)).await.unwrap();
        let b = client.create(shelf("B", 1)).await.unwrap();
        assert_eq!((a, b), (1, 2));

        let fetched = client.get(a).await.unwrap().unwrap();
        assert_eq!(fetched.label, "A");

        let labels: Vec<String> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["A", "B"]);

        client.delete(a).await.unwrap();
        assert!(client.get(a).await.unwrap().is_none());
        assert!(matches!(
            client.delete(a).await,
            Err(FrameworkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unique_key_conflict_does_not_consume_id() {
        let (actor, client) = ResourceActor::<Shelf>::new(10);
        tokio::spawn(actor.run());

        client.create(shelf("A", 1)).await.unwrap();
        let err = client.create(shelf("A", 5)).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Conflict(key) if key == "A"));

        let next = client.create(shelf("C", 1)).await.unwrap();
        assert_eq!(next, 2);
        assert_eq!(client.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_entity_errors_are_boxed_and_state_is_kept() {
        let (actor, client) = ResourceActor::<Shelf>::new(10);
        tokio::spawn(actor.run());

        let err = client.create(shelf("empty", 0)).await.unwrap_err();
        assert!(matches!(err, FrameworkError::EntityError(_)));

        let id = client.create(shelf("one", 1)).await.unwrap();
        assert_eq!(client.perform_action(id, ShelfAction::Take).await.unwrap(), 0);

        match client.perform_action(id, ShelfAction::Take).await {
            Err(FrameworkError::EntityError(inner)) => {
                assert!(matches!(
                    inner.downcast::<ShelfError>().map(|e| *e),
                    Ok(ShelfError::Empty)
                ));
            }
            other => panic!("expected entity error, got {:?}", other),
        }
        assert_eq!(client.get(id).await.unwrap().unwrap().slots, 0);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_actor_closed() {
        let (actor, client) = ResourceActor::<Shelf>::new(1);
        drop(actor);
        assert!(matches!(
            client.list().await,
            Err(FrameworkError::ActorClosed)
        ));
    }
}
