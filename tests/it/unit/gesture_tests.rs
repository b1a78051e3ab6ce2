//! Gesture Tracker Tests

use crate::helpers::pointer;
use domino::geometry::Vec2;
use domino::input::{GestureEvent, GestureTracker};

#[test]
fn test_travel_at_limit_is_a_click() {
    let mut tracker = GestureTracker::begin(pointer(1, 0.0, 0.0));
    tracker.pointer_move(&pointer(1, 3.0, 2.0));

    let release = tracker.pointer_up(&pointer(1, 3.0, 2.0)).expect("release");
    assert!(release.is_click);
    let events: Vec<GestureEvent> = release.events().collect();
    assert!(matches!(events.as_slice(), [GestureEvent::Up(_), GestureEvent::Click(_)]));
}

#[test]
fn test_travel_over_limit_never_clicks() {
    let mut tracker = GestureTracker::begin(pointer(1, 0.0, 0.0));
    tracker.pointer_move(&pointer(1, 4.0, 2.0));

    let release = tracker.pointer_up(&pointer(1, 4.0, 2.0)).expect("release");
    assert!(!release.is_click);
    assert_eq!(release.events().count(), 1);
}

#[test]
fn test_jitter_accumulates_even_when_returning_home() {
    let mut tracker = GestureTracker::begin(pointer(1, 0.0, 0.0));
    for _ in 0..3 {
        tracker.pointer_move(&pointer(1, 0.0, 0.0).with_movement(Vec2::new(2.0, 0.0)));
        tracker.pointer_move(&pointer(1, 0.0, 0.0).with_movement(Vec2::new(-2.0, 0.0)));
    }
    assert_eq!(tracker.total_movement(), 12.0);
    assert!(!tracker.is_click_so_far());
}

#[test]
fn test_other_pointers_and_late_events_are_ignored() {
    let mut tracker = GestureTracker::begin(pointer(1, 0.0, 0.0));
    assert!(tracker.pointer_move(&pointer(2, 50.0, 50.0)).is_none());
    assert!(tracker.pointer_up(&pointer(2, 50.0, 50.0)).is_none());
    assert_eq!(tracker.total_movement(), 0.0);

    assert!(tracker.pointer_up(&pointer(1, 0.0, 0.0)).is_some());
    assert!(tracker.pointer_up(&pointer(1, 0.0, 0.0)).is_none());
    assert!(tracker.pointer_move(&pointer(1, 9.0, 9.0)).is_none());
}

#[test]
fn test_cancelled_tracker_emits_nothing() {
    let mut tracker = GestureTracker::begin(pointer(1, 0.0, 0.0));
    tracker.cancel();
    assert!(!tracker.is_active());
    assert!(tracker.pointer_up(&pointer(1, 0.0, 0.0)).is_none());
}
