//! # Book Actor
//!
//! Owns every [`Book`] and guards the availability invariant
//! `0 <= available_copies <= total_copies`.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Book`]
//! - [`error`] - [`BookError`]
//! - [`actions`] - [`BookAction`] and [`BookActionResult`]
//!
//! ## Uniqueness
//!
//! A book's ISBN is its unique key, so the actor refuses a second
//! registration of the same ISBN even when two requests race.
//!
//! ## Usage
//!
//! ```rust
//! use library_lending::book_actor;
//! use library_lending::clients::BookClient;
//! use library_lending::model::BookCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = book_actor::new(32);
//!     let client = BookClient::new(generic_client);
//!     tokio::spawn(actor.run());
//!
//!     let id = client
//!         .create_book(BookCreate {
//!             title: "Clean Code".into(),
//!             author: "R. Martin".into(),
//!             isbn: "8000000000000".into(),
//!             total_copies: 2,
//!         })
//!         .await?;
//!
//!     assert_eq!(client.adjust_availability(id, -1).await?, 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Book;

/// Creates a new Book actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Book>, ResourceClient<Book>) {
    ResourceActor::new(buffer_size)
}
