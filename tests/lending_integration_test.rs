use chrono::{DateTime, Duration, TimeZone, Utc};
use library_lending::clients::ActorClient;
use library_lending::clock::ManualClock;
use library_lending::config::{LendingPolicy, LibraryConfig};
use library_lending::lending::{FeeStatus, Outcome};
use library_lending::lifecycle::LibrarySystem;
use library_lending::model::{BookId, PatronId};
use library_lending::store::LibraryStore;
use std::sync::Arc;

fn march_first() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()
}

fn system_at(start: DateTime<Utc>) -> (LibrarySystem, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start));
    let system = LibrarySystem::with_clock(LibraryConfig::default(), clock.clone());
    (system, clock)
}

async fn book_id_for(system: &LibrarySystem, isbn: &str) -> BookId {
    system
        .catalog
        .search(isbn, "isbn")
        .await
        .first()
        .expect("book not in catalog")
        .id
}

/// Registration, borrow, overdue return and status through every actor.
#[tokio::test]
async fn test_full_lending_cycle() {
    let (system, clock) = system_at(march_first());

    let added = system
        .catalog
        .add_book("Clean Code", "R. Martin", "8000000000000", 2)
        .await;
    assert!(added.success, "{}", added.message);

    let duplicate = system
        .catalog
        .add_book("Another Title", "Someone Else", "8000000000000", 5)
        .await;
    assert!(!duplicate.success);
    assert!(duplicate.message.contains("exists"));

    let id = book_id_for(&system, "8000000000000").await;
    let book = system.book_client.get(id).await.unwrap().unwrap();
    assert_eq!(book.available_copies, 2);
    assert_eq!(book.total_copies, 2);

    let borrowed = system.lending.borrow("123456", id).await;
    assert_eq!(
        borrowed,
        Outcome::ok("Successfully borrowed \"Clean Code\". Due date: 2024-03-15.")
    );
    assert_eq!(system.book_client.check_availability(id).await, Ok(1));

    let status = system.status.status_for("123456").await.unwrap();
    assert_eq!(status.books_borrowed_count, 1);
    assert_eq!(status.currently_borrowed[0].book_id, id);
    assert_eq!(status.total_late_fees, 0.0);

    // 40 days past due: fee is capped
    clock.advance(Duration::days(54));
    let fee = system.lending.late_fee_for("123456", id).await.unwrap();
    assert_eq!(fee.days_overdue, 40);
    assert_eq!(fee.fee_amount, 15.0);
    assert_eq!(fee.status, FeeStatus::Late);

    let status = system.status.status_for("123456").await.unwrap();
    assert_eq!(status.total_late_fees, 15.0);

    let returned = system.lending.return_book("123456", id).await;
    assert_eq!(returned, Outcome::ok("Returned. Late by 40 days. Fee $15.00"));
    assert_eq!(system.book_client.check_availability(id).await, Ok(2));

    let again = system.lending.return_book("123456", id).await;
    assert!(again.message.contains("not borrowed"));

    let status = system.status.status_for("123456").await.unwrap();
    assert_eq!(status.books_borrowed_count, 0);
    assert!(status.currently_borrowed.is_empty());

    system.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn test_search_across_catalog() {
    let (system, _clock) = system_at(march_first());
    for (title, author, isbn) in [
        ("The Great Gatsby", "F. Scott Fitzgerald", "9780743273565"),
        ("To Kill a Mockingbird", "Harper Lee", "9780061120084"),
        ("1984", "George Orwell", "9780451524935"),
    ] {
        assert!(system.catalog.add_book(title, author, isbn, 1).await.success);
    }

    assert_eq!(system.catalog.search("KILL", "title").await.len(), 1);
    // "Fitzgerald" and "Harper"
    assert_eq!(system.catalog.search("er", "author").await.len(), 2);
    assert_eq!(system.catalog.search("or", "author").await.len(), 1);
    assert_eq!(system.catalog.search(" 9780451524935 ", "isbn").await.len(), 1);
    assert!(system.catalog.search("9780451", "isbn").await.is_empty());
    assert!(system.catalog.search("Gatsby", "publisher").await.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_copy_is_lent_once() {
    let (system, _clock) = system_at(march_first());
    system
        .catalog
        .add_book("Refactoring", "Martin Fowler", "9780134757599", 1)
        .await;
    let id = book_id_for(&system, "9780134757599").await;

    let mut tasks = Vec::new();
    for n in 0..12 {
        let lending = system.lending.clone();
        let patron = format!("{:06}", 100_000 + n);
        tasks.push(tokio::spawn(async move { lending.borrow(&patron, id).await }));
    }

    let mut winners = 0;
    for task in tasks {
        let outcome = task.await.unwrap();
        if outcome.success {
            winners += 1;
        } else {
            assert_eq!(outcome.message, "This book is currently not available.");
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(system.book_client.check_availability(id).await, Ok(0));

    // losers' records were rolled back
    let open = system
        .loan_client
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.is_active())
        .count();
    assert_eq!(open, 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_availability_stays_in_bounds() {
    let (system, clock) = system_at(march_first());
    system
        .catalog
        .add_book("Clean Code", "R. Martin", "8000000000000", 2)
        .await;
    let id = book_id_for(&system, "8000000000000").await;

    let steps = [
        ("borrow", "111111"),
        ("borrow", "222222"),
        ("borrow", "333333"),
        ("return", "333333"),
        ("return", "111111"),
        ("return", "111111"),
        ("borrow", "333333"),
        ("return", "222222"),
        ("return", "333333"),
    ];
    for (op, patron) in steps {
        clock.advance(Duration::days(3));
        match op {
            "borrow" => system.lending.borrow(patron, id).await,
            _ => system.lending.return_book(patron, id).await,
        };
        let book = system.book_client.get(id).await.unwrap().unwrap();
        assert!(book.available_copies <= book.total_copies);

        let status = system.status.status_for(patron).await.unwrap();
        assert_eq!(status.books_borrowed_count, status.currently_borrowed.len());
    }
    assert_eq!(system.book_client.check_availability(id).await, Ok(2));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_configured_policy_is_applied() {
    let config = LibraryConfig {
        actor_buffer: 4,
        policy: LendingPolicy {
            loan_period_days: 7,
            borrow_limit: 0,
            daily_late_fee: 1.0,
            max_late_fee: 3.0,
        },
    };
    let clock = Arc::new(ManualClock::new(march_first()));
    let system = LibrarySystem::with_clock(config, clock.clone());
    for (n, isbn) in ["9780000000001", "9780000000002", "9780000000003"].iter().enumerate() {
        system
            .catalog
            .add_book(&format!("Volume {n}"), "Anon", isbn, 1)
            .await;
    }

    let first = system.lending.borrow("123456", BookId(1)).await;
    assert_eq!(
        first.message,
        "Successfully borrowed \"Volume 0\". Due date: 2024-03-08."
    );
    // one active loan is more than a limit of zero
    let second = system.lending.borrow("123456", BookId(2)).await;
    assert_eq!(
        second,
        Outcome::failed("You have reached the maximum borrowing limit of 0 books.")
    );

    clock.advance(Duration::days(12));
    let returned = system.lending.return_book("123456", BookId(1)).await;
    assert_eq!(returned, Outcome::ok("Returned. Late by 5 days. Fee $3.00"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_records_belong_to_their_patron() {
    let (system, _clock) = system_at(march_first());
    system
        .catalog
        .add_book("Clean Code", "R. Martin", "8000000000000", 3)
        .await;
    let id = book_id_for(&system, "8000000000000").await;

    assert!(system.lending.borrow("123456", id).await.success);
    let wrong_patron = system.lending.return_book("654321", id).await;
    assert_eq!(
        wrong_patron,
        Outcome::failed("This book was not borrowed by the patron.")
    );

    let patron = PatronId::parse("123456").unwrap();
    let store = system.store();
    assert_eq!(store.count_active_borrows_for_patron(&patron).await, Ok(1));
    drop(store);

    system.shutdown().await.unwrap();
}
