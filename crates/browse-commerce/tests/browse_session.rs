//! Timing behavior of the async browse session on a paused clock.

use std::time::Duration;

use browse_commerce::prelude::*;
use tokio::time::{sleep, timeout, Instant};

fn session() -> BrowseSession {
    BrowseSession::spawn(CatalogStore::sample(), LiveConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_initial_results_are_available_immediately() {
    let mut session = session();
    assert_eq!(session.results().count, 10);
    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_typing_settles_after_quiet_period() {
    let mut session = session();
    let start = Instant::now();

    session.set_search_text("i").unwrap();
    sleep(Duration::from_millis(500)).await;
    session.set_search_text("iPhone").unwrap();
    sleep(Duration::from_millis(999)).await;
    assert_eq!(session.results().count, 10);

    let results = session.changed().await.unwrap();
    assert_eq!(results.count, 4);
    assert_eq!(start.elapsed(), Duration::from_millis(1500));

    let stats = session.shutdown().await.unwrap();
    assert_eq!(stats.keystrokes, 2);
    assert_eq!(stats.superseded_keystrokes, 1);
    assert_eq!(stats.recomputations, 1);
}

#[tokio::test(start_paused = true)]
async fn test_filter_edits_emit_without_waiting() {
    let mut session = session();
    let start = Instant::now();

    session.toggle_condition(ProductCondition::Good).unwrap();
    let results = session.changed().await.unwrap();
    assert_eq!(results.codes(), vec!["5678901"]);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(session
        .filter_state()
        .selected_conditions
        .contains(&ProductCondition::Good));

    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_filter_state_is_not_emitted() {
    let session = session();
    let mut rx = session.subscribe();

    session.set_price_range(0.0, 2000.0).unwrap();
    session.toggle_brand("Apple").unwrap();
    session.toggle_brand("Apple").unwrap();
    sleep(Duration::from_millis(10)).await;

    let stats = session.shutdown().await.unwrap();
    assert_eq!(stats.recomputations, 0);
    assert!(!rx.has_changed().unwrap_or(false));
}

#[tokio::test(start_paused = true)]
async fn test_clear_filters_skips_debounce() {
    let mut session = session();

    session.set_search_text("Samsung").unwrap();
    sleep(Duration::from_millis(1001)).await;
    assert_eq!(session.results().count, 1);

    session.set_search_text("Samsun").unwrap();
    session.clear_filters().unwrap();
    let results = session.changed().await.unwrap();
    assert_eq!(results.count, 10);

    sleep(Duration::from_secs(2)).await;
    let stats = session.shutdown().await.unwrap();
    assert_eq!(stats.recomputations, 2);
}

#[tokio::test(start_paused = true)]
async fn test_changed_waits_past_results_already_read() {
    let mut session = session();

    session.set_search_text("Samsung").unwrap();
    sleep(Duration::from_millis(1001)).await;
    assert_eq!(session.results().count, 1);

    let next = timeout(Duration::from_secs(5), session.changed()).await;
    assert!(next.is_err(), "no gesture was sent, so nothing new is emitted");

    session.toggle_location("Edinburgh").unwrap();
    let results = session.changed().await.unwrap();
    assert!(results.is_empty());

    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_selected_product_is_published() {
    let session = session();
    session.select_product("6789012").unwrap();
    sleep(Duration::from_millis(1)).await;
    assert_eq!(
        session.selected_product().map(|p| p.brand),
        Some("Nothing".to_string())
    );
    session.shutdown().await.unwrap();
}
