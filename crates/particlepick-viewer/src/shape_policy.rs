//! Which annotation shapes are shown, shared by every view of a session.
//!
//! The policy lives behind a single [`ShapeController`]; views hold an
//! `Arc<ShapeController>`, so one keystroke changes what every open view
//! shows and the sharing is visible wherever a view is built.

use parking_lot::RwLock;
use std::sync::Arc;

use particlepick_core::{EventBus, PickerEvent, ShapeKind, ShapeSet, ViewEvent};

/// Shape selection plus the state of the "select-all shapes" toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSelectionPolicy {
    selected: ShapeSet,
    /// Value the next toggle applies to every shape kind
    toggle_next: bool,
}

impl ShapeSelectionPolicy {
    /// Starts from `initial`. The first toggle hides everything when all
    /// shapes are shown and shows everything otherwise.
    pub fn new(initial: ShapeSet) -> Self {
        Self {
            selected: initial,
            toggle_next: !initial.is_all(),
        }
    }

    pub fn is_selected(&self, kind: ShapeKind) -> bool {
        self.selected.contains(kind)
    }

    pub fn selection(&self) -> ShapeSet {
        self.selected
    }

    /// Value the next toggle will apply.
    pub fn toggle_next(&self) -> bool {
        self.toggle_next
    }

    fn set_selected(&mut self, kind: ShapeKind, selected: bool) {
        self.selected.set(kind, selected);
    }

    fn toggle_all(&mut self) -> ShapeSet {
        self.selected = ShapeSet::uniform(self.toggle_next);
        self.toggle_next = !self.toggle_next;
        self.selected
    }
}

impl Default for ShapeSelectionPolicy {
    fn default() -> Self {
        Self::new(ShapeSet::all())
    }
}

/// Sole writer of the shared [`ShapeSelectionPolicy`].
#[derive(Debug)]
pub struct ShapeController {
    policy: RwLock<ShapeSelectionPolicy>,
    events: Arc<EventBus>,
}

impl ShapeController {
    pub fn new(initial: ShapeSet, events: Arc<EventBus>) -> Self {
        Self {
            policy: RwLock::new(ShapeSelectionPolicy::new(initial)),
            events,
        }
    }

    /// Convenience for building the shared handle handed to every view.
    pub fn shared(initial: ShapeSet, events: Arc<EventBus>) -> Arc<Self> {
        Arc::new(Self::new(initial, events))
    }

    pub fn is_selected(&self, kind: ShapeKind) -> bool {
        self.policy.read().is_selected(kind)
    }

    pub fn selection(&self) -> ShapeSet {
        self.policy.read().selection()
    }

    /// Snapshot of the whole policy.
    pub fn policy(&self) -> ShapeSelectionPolicy {
        *self.policy.read()
    }

    /// Shows or hides one shape kind (the toolbar check boxes).
    pub fn set_selected(&self, kind: ShapeKind, selected: bool) {
        let shapes = {
            let mut policy = self.policy.write();
            if policy.is_selected(kind) == selected {
                return;
            }
            policy.set_selected(kind, selected);
            policy.selection()
        };
        tracing::debug!("shape {} selected: {}", kind, selected);
        self.events
            .publish(PickerEvent::View(ViewEvent::ShapesToggled { shapes }));
    }

    /// Applies the toggle value to all three shape kinds, then flips it.
    /// Returns the new selection.
    pub fn toggle_all_shapes(&self) -> ShapeSet {
        let shapes = self.policy.write().toggle_all();
        tracing::debug!("toggled all shapes: {:?}", shapes.kinds());
        self.events
            .publish(PickerEvent::View(ViewEvent::ShapesToggled { shapes }));
        shapes
    }
}
