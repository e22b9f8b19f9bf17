//! Active particle and keyboard fine positioning.
//!
//! At most one particle is active per session. The controller stores its
//! [`ParticleId`] and applies moves to it inside a [`ParticleStore`]; the
//! store itself stays owned by the micrograph.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use particlepick_core::{
    EventBus, Particle, ParticleError, ParticleEvent, ParticleId, ParticleStore, PickerEvent,
};

/// Arrow-key direction for a nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Image-space offset for one press of `step` pixels.
    pub fn delta(self, step: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
        }
    }
}

/// Holds the active particle and moves it.
///
/// Moves are not clamped to the image: a particle may be pushed off-canvas
/// and corrected later. Every successful move sets the session's changed
/// flag and publishes [`ParticleEvent::Moved`] so secondary views repaint.
#[derive(Debug)]
pub struct ParticleMotionController {
    active: Option<ParticleId>,
    step: i32,
    changed: Arc<AtomicBool>,
    events: Arc<EventBus>,
}

impl ParticleMotionController {
    /// Default nudge distance in image pixels
    pub const DEFAULT_STEP: i32 = 1;

    pub fn new(events: Arc<EventBus>) -> Self {
        Self::with_step(events, Self::DEFAULT_STEP)
    }

    /// Uses `step` pixels per nudge; values below 1 are raised to 1.
    pub fn with_step(events: Arc<EventBus>, step: i32) -> Self {
        Self {
            active: None,
            step: step.max(1),
            changed: Arc::new(AtomicBool::new(false)),
            events,
        }
    }

    /// Reports changes through a flag shared with other views of the
    /// session instead of a private one.
    pub fn sharing_changed_flag(mut self, changed: Arc<AtomicBool>) -> Self {
        self.changed = changed;
        self
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Id of the active particle, if any.
    pub fn active(&self) -> Option<ParticleId> {
        self.active
    }

    /// The active particle itself, if it is still in `store`.
    pub fn active_particle<'a>(&self, store: &'a ParticleStore) -> Option<&'a Particle> {
        self.active.and_then(|id| store.get(id))
    }

    /// Makes `id` the active particle, replacing any previous one.
    pub fn select_particle(
        &mut self,
        store: &ParticleStore,
        id: ParticleId,
    ) -> Result<(), ParticleError> {
        store.require(id)?;
        if self.active != Some(id) {
            self.active = Some(id);
            tracing::debug!("active particle {}", id);
            self.events
                .publish(PickerEvent::Particle(ParticleEvent::ActiveChanged { id: Some(id) }));
        }
        Ok(())
    }

    /// Drops the active particle. No-op when nothing is active.
    pub fn clear_active(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!("active particle cleared");
            self.events
                .publish(PickerEvent::Particle(ParticleEvent::ActiveChanged { id: None }));
        }
    }

    /// Moves the active particle by `(dx, dy)` image pixels.
    ///
    /// Returns the new position, or `None` (changing nothing) when no
    /// particle is active.
    pub fn move_active(
        &mut self,
        store: &mut ParticleStore,
        dx: i32,
        dy: i32,
    ) -> Option<(i32, i32)> {
        self.place_active(store, |(x, y)| (x.saturating_add(dx), y.saturating_add(dy)))
    }

    /// Moves the active particle one step in `direction`.
    pub fn nudge(&mut self, store: &mut ParticleStore, direction: Direction) -> Option<(i32, i32)> {
        let (dx, dy) = direction.delta(self.step);
        self.move_active(store, dx, dy)
    }

    /// Puts the active particle at an absolute image position.
    pub fn set_position(&mut self, store: &mut ParticleStore, x: i32, y: i32) -> Option<(i32, i32)> {
        self.place_active(store, |_| (x, y))
    }

    /// True once any particle changed since the last [`mark_saved`](Self::mark_saved).
    pub fn is_changed(&self) -> bool {
        self.changed.load(Ordering::SeqCst)
    }

    pub fn mark_changed(&mut self) {
        self.changed.store(true, Ordering::SeqCst);
    }

    pub fn mark_saved(&mut self) {
        self.changed.store(false, Ordering::SeqCst);
    }

    fn place_active(
        &mut self,
        store: &mut ParticleStore,
        target: impl FnOnce((i32, i32)) -> (i32, i32),
    ) -> Option<(i32, i32)> {
        let id = self.active?;
        let Some(particle) = store.get_mut(id) else {
            tracing::warn!("active particle {} no longer exists, dropping it", id);
            self.clear_active();
            return None;
        };

        let (x, y) = target(particle.position());
        particle.set_position(x, y);
        self.changed.store(true, Ordering::SeqCst);
        tracing::trace!("particle {} moved to ({}, {})", id, x, y);
        self.events
            .publish(PickerEvent::Particle(ParticleEvent::Moved { id, x, y }));
        Some((x, y))
    }
}
