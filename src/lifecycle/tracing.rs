//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter with an
//! `EnvFilter` read from `RUST_LOG`. Without `RUST_LOG` only this crate's
//! `info` events are shown.
//!
//! ```bash
//! # Default: catalog, borrow and return outcomes
//! cargo run
//!
//! # Every actor request with its entity id
//! RUST_LOG=library_lending=debug cargo run
//!
//! # Only the actor runtime
//! RUST_LOG=library_lending::framework=debug cargo run
//! ```
//!
//! Fields are structured, so a borrow at `info` reads like:
//!
//! ```text
//! INFO borrowing: Book borrowed patron=123456 book_id=book_1 loan_id=loan_1 due=2024-03-15
//! ```
//!
//! Actor loops log with an `entity_type` field instead of a module path, which
//! is why targets are hidden.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "library_lending=info";

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
