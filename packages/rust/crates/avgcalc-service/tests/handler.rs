#![allow(missing_docs)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use avgcalc_service::test_support::{FakeBehavior, FakeNumberSource};
use avgcalc_service::{
    Category, FETCH_FAILED_MESSAGE, InvalidCategory, NumbersHandler, WindowStore,
};

const BUDGET: Duration = Duration::from_millis(500);

fn handler_with(store: &WindowStore, source: &FakeNumberSource, timeout: Duration) -> NumbersHandler {
    NumbersHandler::new(store.clone(), Arc::new(source.clone()), timeout, BUDGET)
}

fn assert_avg(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "avg {actual} != {expected}");
}

#[tokio::test]
async fn duplicate_batch_collapses() {
    let store = WindowStore::new(3);
    let source = FakeNumberSource::numbers(&[4, 4, 2]);
    let handler = handler_with(&store, &source, Duration::from_millis(450));

    let resp = handler.handle("e").await.expect("response");
    assert!(resp.window_prev_state.is_empty());
    assert_eq!(resp.window_curr_state, vec![4, 2]);
    assert_eq!(resp.numbers, vec![4, 4, 2]);
    assert_avg(resp.avg, 3.0);
    assert!(resp.error.is_none());
}

#[tokio::test]
async fn full_window_evicts_oldest() {
    let store = WindowStore::new(3);
    store.merge(Category::Primes, &[1, 2, 3]).await;
    let source = FakeNumberSource::numbers(&[5]);
    let handler = handler_with(&store, &source, Duration::from_millis(450));

    let resp = handler.handle("p").await.expect("response");
    assert_eq!(resp.window_prev_state, vec![1, 2, 3]);
    assert_eq!(resp.window_curr_state, vec![2, 3, 5]);
    assert_avg(resp.avg, 3.33);
}

#[tokio::test]
async fn previous_state_tracks_successive_calls() {
    let store = WindowStore::new(4);
    let source = FakeNumberSource::numbers(&[1, 2, 3]);
    let handler = handler_with(&store, &source, Duration::from_millis(450));

    let first = handler.handle("random").await.expect("first");
    let second = handler.handle("RANDOM").await.expect("second");
    assert_eq!(second.window_prev_state, first.window_curr_state);
    assert_eq!(second.window_curr_state, vec![1, 2, 3]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn timeout_is_soft_failure_with_window_unchanged() {
    let store = WindowStore::new(3);
    store.merge(Category::Fibonacci, &[1, 2]).await;
    let source = FakeNumberSource::new(FakeBehavior::Slow(Duration::from_secs(5), vec![8, 13]));
    let handler = handler_with(&store, &source, Duration::from_millis(50));

    let started = Instant::now();
    let resp = handler.handle("f").await.expect("soft failure");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(resp.window_prev_state, vec![1, 2]);
    assert_eq!(resp.window_curr_state, vec![1, 2]);
    assert!(resp.numbers.is_empty());
    assert_avg(resp.avg, 1.5);
    assert_eq!(resp.error.as_deref(), Some(FETCH_FAILED_MESSAGE));

    // The abandoned fetch must never land in the window.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(store.snapshot(Category::Fibonacci).await, vec![1, 2]);
}

#[tokio::test]
async fn transport_and_format_errors_are_soft_failures() {
    for behavior in [FakeBehavior::Transport, FakeBehavior::Format] {
        let store = WindowStore::new(3);
        store.merge(Category::Even, &[2, 4, 6]).await;
        let source = FakeNumberSource::new(behavior);
        let handler = handler_with(&store, &source, Duration::from_millis(450));

        let resp = handler.handle("e").await.expect("soft failure");
        assert_eq!(resp.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(resp.window_prev_state, resp.window_curr_state);
        assert_eq!(resp.window_curr_state, vec![2, 4, 6]);
        assert!(resp.numbers.is_empty());
        assert_avg(resp.avg, 4.0);
    }
}

#[tokio::test]
async fn empty_window_soft_failure_has_zero_average() {
    let store = WindowStore::default();
    let source = FakeNumberSource::new(FakeBehavior::Transport);
    let handler = handler_with(&store, &source, Duration::from_millis(450));

    for category in Category::ALL {
        let resp = handler.handle(category.short_id()).await.expect("soft failure");
        assert!(resp.window_curr_state.is_empty());
        assert_avg(resp.avg, 0.0);
    }
}

#[tokio::test]
async fn invalid_category_touches_nothing() {
    let store = WindowStore::new(3);
    let source = FakeNumberSource::numbers(&[1, 2, 3]);
    let handler = handler_with(&store, &source, Duration::from_millis(450));

    let err = handler.handle("x").await.expect_err("invalid");
    assert_eq!(err, InvalidCategory("x".to_string()));
    assert_eq!(source.calls(), 0);
    for category in Category::ALL {
        assert!(store.snapshot(category).await.is_empty());
    }
}

#[tokio::test]
async fn slow_but_in_time_fetch_succeeds() {
    let store = WindowStore::new(3);
    let source = FakeNumberSource::new(FakeBehavior::Slow(Duration::from_millis(10), vec![9]));
    let handler = handler_with(&store, &source, Duration::from_millis(450));

    let resp = handler.handle("r").await.expect("response");
    assert_eq!(resp.window_curr_state, vec![9]);
    assert!(resp.error.is_none());
}
