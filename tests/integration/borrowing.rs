//! Catalog, wishlist and borrow workflow

use chrono::{Duration, Utc};
use perpustb::models::{BookQuery, LibraryStats, ALL_CATEGORIES};
use tokio_test::assert_ok;

use super::memory_state;

#[tokio::test]
async fn test_search_then_borrow_then_return() {
    let (_, state) = memory_state();
    let services = &state.services;

    let found = services
        .catalog
        .search(&BookQuery::new("laskar", ALL_CATEGORIES));
    assert_eq!(found.len(), 1);
    let book = &found[0];

    let borrowed = assert_ok!(
        services
            .loans
            .borrow(book, services.loans.default_return_date().unwrap())
            .await
    );
    assert_eq!(borrowed.days_left(), 14);
    assert_eq!(services.loans.borrowed_books().await.len(), 1);

    services.loans.return_book(&book.id).await;
    assert!(services.loans.borrowed_books().await.is_empty());
}

#[tokio::test]
async fn test_catalog_is_not_mutated_by_borrowing() {
    let (_, state) = memory_state();
    let services = &state.services;
    let book = services.catalog.get_book("2").unwrap();

    assert_ok!(
        services
            .loans
            .borrow(&book, Utc::now() + Duration::days(5))
            .await
    );
    assert!(services.catalog.get_book("2").unwrap().available);
}

#[tokio::test]
async fn test_stats() {
    let (_, state) = memory_state();
    let services = &state.services;
    let now = Utc::now();

    services.catalog.toggle_wishlist("4").await;
    services.catalog.toggle_wishlist("9").await;
    services.catalog.toggle_wishlist("9").await;

    let book = services.catalog.get_book("1").unwrap();
    assert_ok!(
        services
            .loans
            .borrow_at(&book, now + Duration::days(3), now)
            .await
    );

    let stats = services.stats_at(now + Duration::days(4)).await;
    assert_eq!(
        stats,
        LibraryStats {
            total_books: services.catalog.count_books(),
            active_borrows: 1,
            overdue: 1,
            wishlist: 1,
        }
    );
}
