//! Generic resource-actor runtime behind the lending store.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored resource types implement
//! - [`ResourceActor`] - Generic actor that owns a collection of entities
//! - [`ResourceClient`] - Typed handle for sending requests to an actor
//! - [`FrameworkError`] - Runtime errors
//!
//! # Testing
//!
//! See the [`mock`] module for scripting an actor's replies in tests.

pub mod core;
pub mod mock;

pub use self::core::{ActorEntity, FrameworkError, ResourceActor, ResourceClient, ResourceRequest, Response};
