//! # Library Lending
//!
//! Business rules for a lending library: registering books, borrowing and
//! returning copies, late fees and per-patron status reports.
//!
//! Durable state lives behind the [`LibraryStore`](store::LibraryStore) trait.
//! The bundled implementation, [`ActorStore`](store::ActorStore), keeps books
//! and borrow records in two Tokio actors. Each actor applies its requests one
//! at a time, so availability updates for a book are linearizable and the last
//! copy of a book can only be lent once.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic `ResourceActor<T>` and its client. Entity types plug in by
//! implementing [`ActorEntity`](framework::ActorEntity).
//! See [`framework::mock`] for scripting actor replies in tests.
//!
//! ### 2. The Resources ([`model`], [`book_actor`], [`loan_actor`], [`clients`])
//! [`Book`](model::Book) and [`BorrowRecord`](model::BorrowRecord), the actors
//! that own them and the typed clients that talk to those actors.
//!
//! ### 3. The Contract ([`store`])
//! The nine lookups and writes the services rely on, plus the two
//! compensating writes used to undo half-finished workflows.
//!
//! ### 4. The Rules ([`lending`])
//! Catalog, borrow/return, fees and status. Services take the store and a
//! [`Clock`](clock::Clock) as injected dependencies.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`LibrarySystem`](lifecycle::LibrarySystem) starts the actors from a
//! [`LibraryConfig`](config::LibraryConfig) and shuts them down again.
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=library_lending=debug cargo run
//! cargo test
//! ```

pub mod book_actor;
pub mod clients;
pub mod clock;
pub mod config;
pub mod framework;
pub mod lending;
pub mod lifecycle;
pub mod loan_actor;
pub mod model;
pub mod store;
