pub mod library_system;
pub mod tracing;

pub use library_system::LibrarySystem;
pub use self::tracing::setup_tracing;
