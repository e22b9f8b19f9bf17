use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use particlepick_core::{EventBus, EventCategory, EventFilter, ShapeKind, ShapeSet};
use particlepick_viewer::shape_policy::ShapeController;

#[test]
fn test_toggle_twice_restores_selection() {
    let controller = ShapeController::new(ShapeSet::all(), Arc::new(EventBus::new()));
    let before = controller.policy();

    assert_eq!(controller.toggle_all_shapes(), ShapeSet::none());
    assert_eq!(controller.toggle_all_shapes(), ShapeSet::all());
    assert_eq!(controller.policy(), before);
}

#[test]
fn test_toggle_after_manual_change() {
    let controller = ShapeController::new(ShapeSet::all(), Arc::new(EventBus::new()));
    controller.set_selected(ShapeKind::Circle, false);
    assert!(!controller.is_selected(ShapeKind::Circle));
    assert!(controller.is_selected(ShapeKind::Rectangle));

    // the toggle applies its pending value uniformly, whatever the mix
    assert_eq!(controller.toggle_all_shapes(), ShapeSet::none());
    assert_eq!(controller.toggle_all_shapes(), ShapeSet::all());
}

#[test]
fn test_changes_are_published() {
    let events = Arc::new(EventBus::new());
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    events.subscribe(EventFilter::Categories(vec![EventCategory::View]), move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let controller = ShapeController::new(ShapeSet::all(), events);
    controller.set_selected(ShapeKind::Rectangle, true);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    controller.set_selected(ShapeKind::Rectangle, false);
    controller.toggle_all_shapes();
    assert_eq!(count.load(Ordering::SeqCst), 2);
}
