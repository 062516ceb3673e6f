//! Demo: a month in a small library, driven by a manual clock.

use chrono::{Duration, TimeZone, Utc};
use library_lending::clock::ManualClock;
use library_lending::config::LibraryConfig;
use library_lending::lifecycle::{setup_tracing, LibrarySystem};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => LibraryConfig::from_file(&path).map_err(|e| e.to_string())?,
        None => LibraryConfig::default(),
    };

    let start = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .ok_or("invalid start date")?;
    let clock = Arc::new(ManualClock::new(start));
    let system = LibrarySystem::with_clock(config, clock.clone());

    let span = tracing::info_span!("cataloging");
    async {
        for (title, author, isbn, copies) in [
            ("Clean Code", "R. Martin", "8000000000000", 2),
            ("The Pragmatic Programmer", "Hunt & Thomas", "9780135957059", 1),
            ("Refactoring", "Martin Fowler", "9780134757599", 1),
            ("Clean Code", "R. Martin", "8000000000000", 1),
        ] {
            let outcome = system.catalog.add_book(title, author, isbn, copies).await;
            if outcome.success {
                info!(message = %outcome.message, "Catalog");
            } else {
                warn!(message = %outcome.message, "Catalog");
            }
        }
    }
    .instrument(span)
    .await;

    let found = system.catalog.search("clean", "title").await;
    let clean_code = found.first().ok_or("Clean Code missing from catalog")?.id;
    let pragmatic = system
        .catalog
        .search("9780135957059", "isbn")
        .await
        .first()
        .ok_or("Pragmatic Programmer missing from catalog")?
        .id;

    let span = tracing::info_span!("borrowing");
    async {
        for (patron, book) in [("123456", clean_code), ("123456", pragmatic), ("654321", pragmatic)] {
            let outcome = system.lending.borrow(patron, book).await;
            info!(patron, success = outcome.success, message = %outcome.message, "Borrow");
        }
    }
    .instrument(span)
    .await;

    clock.advance(Duration::days(24));

    let status = system
        .status
        .status_for("123456")
        .await
        .map_err(|e| e.to_string())?;
    info!(
        loans = status.books_borrowed_count,
        total_late_fees = status.total_late_fees,
        "Patron 123456 after 24 days"
    );

    let span = tracing::info_span!("returning");
    async {
        for (patron, book) in [("123456", clean_code), ("654321", clean_code)] {
            let outcome = system.lending.return_book(patron, book).await;
            info!(patron, success = outcome.success, message = %outcome.message, "Return");
        }
    }
    .instrument(span)
    .await;

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
