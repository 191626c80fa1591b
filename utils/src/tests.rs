/// Tests for the shared helpers
use crate::logging::LogLevel;
use crate::region::Rect;
use crate::{partial_max, partial_min};

#[test]
fn rect_contains_interior_points() {
    let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

    assert!(rect.intersects(50.0, 40.0));
    assert!(rect.intersects(10.5, 20.5));
    assert!(rect.intersects(109.5, 69.5));
}

#[test]
fn rect_rejects_exterior_points() {
    let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

    assert!(!rect.intersects(5.0, 40.0));
    assert!(!rect.intersects(200.0, 40.0));
    assert!(!rect.intersects(50.0, 10.0));
    assert!(!rect.intersects(50.0, 100.0));
}

#[test]
fn rect_edges_are_exclusive() {
    let rect = Rect::new(0, 0, 10, 10);

    // points exactly on the boundary are not contained
    assert!(!rect.intersects(0, 5));
    assert!(!rect.intersects(10, 5));
    assert!(!rect.intersects(5, 0));
    assert!(!rect.intersects(5, 10));
}

#[test]
fn partial_ordering_helpers() {
    assert_eq!(partial_max(1.0, 2.0), 2.0);
    assert_eq!(partial_max(2.0, 1.0), 2.0);
    assert_eq!(partial_min(1.0, 2.0), 1.0);
    assert_eq!(partial_min(2.0, 1.0), 1.0);
}

#[test]
fn log_levels_are_ordered() {
    // critical must always display, so it gets the lowest value
    assert!(LogLevel::critical.get_level() < LogLevel::error.get_level());
    assert!(LogLevel::error.get_level() < LogLevel::debug.get_level());
    assert!(LogLevel::debug.get_level() < LogLevel::info.get_level());
    assert!(LogLevel::info.get_level() < LogLevel::profiling.get_level());
}
