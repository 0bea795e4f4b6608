//! Integration tests for NumberWindow.

use avgcalc_window::{DEFAULT_WINDOW_SIZE, NumberWindow, WindowSnapshot, average};

#[test]
fn test_empty_window_average_is_zero() {
    let w = NumberWindow::default();
    assert_eq!(w.capacity(), DEFAULT_WINDOW_SIZE);
    assert!(w.is_empty());
    assert!(average(&w.as_vec()).abs() < f64::EPSILON);
}

#[test]
fn test_batch_duplicates_collapse() {
    let mut w = NumberWindow::new(3);
    let snap = w.merge(&[4, 4, 2]);
    assert!(snap.previous.is_empty());
    assert_eq!(snap.current, vec![4, 2]);
    assert!((average(&w.as_vec()) - 3.0).abs() < 1e-9);
}

#[test]
fn test_full_window_evicts_oldest() {
    let mut w = NumberWindow::new(3);
    w.merge(&[1, 2, 3]);
    let snap = w.merge(&[5]);
    assert_eq!(snap.previous, vec![1, 2, 3]);
    assert_eq!(snap.current, vec![2, 3, 5]);
    assert!((average(&snap.current) - 3.33).abs() < 1e-9);
}

#[test]
fn test_existing_members_are_not_reinserted() {
    let mut w = NumberWindow::new(3);
    w.merge(&[1, 2, 3]);
    let snap = w.merge(&[3, 1, 2, 1]);
    assert!(snap.is_unchanged());
    assert_eq!(w.as_vec(), vec![1, 2, 3]);
}

#[test]
fn test_existing_member_does_not_move_to_back() {
    let mut w = NumberWindow::new(3);
    w.merge(&[1, 2, 3]);
    let snap = w.merge(&[1, 4]);
    assert_eq!(snap.current, vec![2, 3, 4]);
    assert_eq!(snap.inserted(), vec![4]);
}

#[test]
fn test_overflowing_batch_keeps_most_recent() {
    let mut w = NumberWindow::new(4);
    let snap = w.merge(&(1..=10).collect::<Vec<_>>());
    assert_eq!(snap.current, vec![7, 8, 9, 10]);
    assert_eq!(w.len(), 4);
}

#[test]
fn test_length_never_exceeds_capacity() {
    let mut w = NumberWindow::new(5);
    for batch in [[1, 2, 3], [3, 4, 5], [6, 7, 8], [8, 9, 10]] {
        let snap = w.merge(&batch);
        assert!(snap.current.len() <= 5);
        assert_eq!(w.len(), snap.current.len());
    }
    assert_eq!(w.as_vec(), vec![6, 7, 8, 9, 10]);
}

#[test]
fn test_previous_matches_prior_state() {
    let mut w = NumberWindow::new(3);
    let mut last = Vec::new();
    for batch in [vec![9], vec![9, 8], vec![], vec![7, 6, 5]] {
        let snap = w.merge(&batch);
        assert_eq!(snap.previous, last);
        last = snap.current;
    }
}

#[test]
fn test_zero_capacity_is_clamped() {
    let mut w = NumberWindow::new(0);
    assert_eq!(w.capacity(), 1);
    let snap = w.merge(&[1, 2]);
    assert_eq!(snap.current, vec![2]);
    assert!(w.contains(2));
    assert!(!w.contains(1));
}

#[test]
fn test_average_after_wraparound() {
    let mut w = NumberWindow::new(3);
    w.merge(&[1, 2, 3]);
    w.merge(&[4, 5]);
    assert_eq!(w.as_vec(), vec![3, 4, 5]);
    assert!((average(&w.as_vec()) - 4.0).abs() < 1e-9);
}

#[test]
fn test_snapshot_serializes_as_plain_lists() {
    let snap = WindowSnapshot::unchanged(vec![1, 2]);
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json, serde_json::json!({"previous": [1, 2], "current": [1, 2]}));
}
