//! Picking canvas: the per-view glue between the micrograph, its viewport,
//! the active particle and the shared shape policy.
//!
//! The GUI decodes its own key and mouse events into [`KeyIntent`]s and view
//! coordinates, calls into a [`PickingCanvas`], and repaints when told to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use particlepick_core::{
    EventBus, GeometryError, ImageSource, ImageSpace, Particle, ParticleError, ParticleFamily,
    ParticleId, ParticleStore, PickerEvent, SessionEvent, ShapeKind, ViewEvent,
};
use particlepick_settings::PickerConfig;

use crate::motion::{Direction, ParticleMotionController};
use crate::overlay::{particle_overlay, ParticleOverlay, ViewSegment};
use crate::reference_line::ReferenceLine;
use crate::shape_policy::ShapeController;
use crate::viewport::ViewTransform;

/// A loaded micrograph and the particles picked on it.
#[derive(Debug, Clone)]
pub struct Micrograph {
    name: String,
    image: ImageSpace,
    particles: ParticleStore,
}

impl Micrograph {
    pub fn new(name: impl Into<String>, image: ImageSpace) -> Self {
        Self {
            name: name.into(),
            image,
            particles: ParticleStore::new(),
        }
    }

    /// Reads the image extent from the external image collaborator.
    pub fn from_source(
        name: impl Into<String>,
        source: &dyn ImageSource,
    ) -> Result<Self, GeometryError> {
        Ok(Self::new(name, ImageSpace::from_source(source)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &ImageSpace {
        &self.image
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleStore {
        &mut self.particles
    }
}

/// Keyboard input, already decoded by the GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyIntent {
    Up,
    Down,
    Left,
    Right,
    /// Show or hide every annotation shape at once
    ToggleShapes,
    /// Any key the canvas does not handle
    Other,
}

impl KeyIntent {
    pub fn direction(self) -> Option<Direction> {
        match self {
            KeyIntent::Up => Some(Direction::Up),
            KeyIntent::Down => Some(Direction::Down),
            KeyIntent::Left => Some(Direction::Left),
            KeyIntent::Right => Some(Direction::Right),
            KeyIntent::ToggleShapes | KeyIntent::Other => None,
        }
    }
}

/// What a canvas needs from the frame that hosts it. Clones share the
/// shape policy, the event bus and the session's changed flag.
#[derive(Debug, Clone)]
pub struct FrameContext {
    shapes: Arc<ShapeController>,
    events: Arc<EventBus>,
    changed: Arc<AtomicBool>,
    cross_half_length: f64,
}

impl FrameContext {
    /// Default half-length of the centre cross, in image pixels
    pub const DEFAULT_CROSS_HALF_LENGTH: f64 = 10.0;

    pub fn new(shapes: Arc<ShapeController>, events: Arc<EventBus>) -> Self {
        Self {
            shapes,
            events,
            changed: Arc::new(AtomicBool::new(false)),
            cross_half_length: Self::DEFAULT_CROSS_HALF_LENGTH,
        }
    }

    /// Builds a fresh event bus and shape controller from the config.
    pub fn from_config(config: &PickerConfig) -> Self {
        let events = Arc::new(EventBus::with_config(config.event_bus_config()));
        let shapes = ShapeController::shared(config.shapes, events.clone());
        let mut frame = Self::new(shapes, events);
        frame.cross_half_length = config.picking.center_cross_length;
        frame
    }

    /// A frame for another view of the same session, sharing the shape
    /// policy and the event bus.
    pub fn share(&self) -> Self {
        self.clone()
    }

    pub fn shapes(&self) -> &Arc<ShapeController> {
        &self.shapes
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn is_shape_selected(&self, kind: ShapeKind) -> bool {
        self.shapes.is_selected(kind)
    }

    /// True once any view of the session changed the model since the last
    /// save.
    pub fn is_changed(&self) -> bool {
        self.changed.load(Ordering::SeqCst)
    }

    pub fn mark_changed(&self) {
        self.changed.store(true, Ordering::SeqCst);
    }

    pub fn mark_saved(&self) {
        self.changed.store(false, Ordering::SeqCst);
    }

    pub fn cross_half_length(&self) -> f64 {
        self.cross_half_length
    }

    pub fn set_cross_half_length(&mut self, length: f64) -> Result<(), GeometryError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(GeometryError::invalid(format!(
                "cross half-length must be > 0, got {}",
                length
            )));
        }
        self.cross_half_length = length;
        Ok(())
    }
}

/// Capabilities every annotation mode's canvas offers to the geometry code.
pub trait AnnotationCanvas {
    /// The particle under keyboard control, if any.
    fn active(&self) -> Option<&Particle>;

    /// Makes `id` active (if it exists), marks the model changed and asks
    /// dependents to repaint.
    fn refresh_active(&mut self, id: ParticleId);

    fn frame_context(&self) -> &FrameContext;

    fn micrograph(&self) -> &Micrograph;
}

/// Canvas for manual picking on one micrograph.
#[derive(Debug)]
pub struct PickingCanvas {
    micrograph: Micrograph,
    view: ViewTransform,
    motion: ParticleMotionController,
    frame: FrameContext,
}

impl PickingCanvas {
    /// Opens a view of the whole micrograph at `magnification`.
    pub fn new(
        micrograph: Micrograph,
        magnification: f64,
        frame: FrameContext,
    ) -> Result<Self, GeometryError> {
        let view = ViewTransform::new(*micrograph.image(), magnification)?;
        let motion = ParticleMotionController::new(frame.events().clone())
            .sharing_changed_flag(frame.changed.clone());
        Ok(Self {
            micrograph,
            view,
            motion,
            frame,
        })
    }

    /// Opens a view using the configured magnification and nudge step.
    pub fn from_config(
        micrograph: Micrograph,
        config: &PickerConfig,
        frame: FrameContext,
    ) -> Result<Self, GeometryError> {
        let mut canvas = Self::new(micrograph, config.view.initial_magnification, frame)?;
        canvas.motion =
            ParticleMotionController::with_step(canvas.frame.events().clone(), config.picking.nudge_step)
                .sharing_changed_flag(canvas.frame.changed.clone());
        Ok(canvas)
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn motion(&self) -> &ParticleMotionController {
        &self.motion
    }

    pub fn frame_mut(&mut self) -> &mut FrameContext {
        &mut self.frame
    }

    /// Session dirty flag, shared by every view of the frame.
    pub fn is_changed(&self) -> bool {
        self.frame.is_changed()
    }

    pub fn mark_saved(&mut self) {
        self.frame.mark_saved();
    }

    // ---- particles -------------------------------------------------------

    /// Picks a new particle at an image position.
    pub fn add_particle(&mut self, x: i32, y: i32, family: Arc<ParticleFamily>) -> ParticleId {
        let id = self.micrograph.particles_mut().add(x, y, family);
        self.refresh();
        id
    }

    /// Removes a particle, clearing the active reference if it pointed there.
    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        let removed = self.micrograph.particles_mut().remove(id)?;
        if self.motion.active() == Some(id) {
            self.motion.clear_active();
        }
        self.refresh();
        Some(removed)
    }

    pub fn select_particle(&mut self, id: ParticleId) -> Result<(), ParticleError> {
        self.motion.select_particle(self.micrograph.particles(), id)
    }

    pub fn clear_active(&mut self) {
        self.motion.clear_active();
    }

    pub fn active_id(&self) -> Option<ParticleId> {
        self.motion.active()
    }

    /// Moves the active particle; returns its new position, or `None` when
    /// nothing is active.
    pub fn move_active(&mut self, dx: i32, dy: i32) -> Option<(i32, i32)> {
        self.motion
            .move_active(self.micrograph.particles_mut(), dx, dy)
    }

    /// Drags the active particle to an absolute image position.
    pub fn set_active_position(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        self.motion
            .set_position(self.micrograph.particles_mut(), x, y)
    }

    /// Selects the topmost particle under a view-space click, or clears the
    /// active particle when the click hits nothing.
    pub fn select_at_view(&mut self, view_x: f64, view_y: f64) -> Option<ParticleId> {
        let (px, py) = self.view.view_to_image(view_x, view_y);
        match self.micrograph.particles().particle_at(px, py) {
            Some(id) => {
                if let Err(e) = self.motion.select_particle(self.micrograph.particles(), id) {
                    tracing::warn!("hit particle could not be selected: {}", e);
                    return None;
                }
                Some(id)
            }
            None => {
                self.motion.clear_active();
                None
            }
        }
    }

    /// Applies a key press. Returns true when the canvas needs a repaint.
    ///
    /// Arrow keys nudge the active particle and are ignored without one.
    pub fn handle_key(&mut self, key: KeyIntent) -> bool {
        if let Some(direction) = key.direction() {
            return self
                .motion
                .nudge(self.micrograph.particles_mut(), direction)
                .is_some();
        }
        match key {
            KeyIntent::ToggleShapes => {
                self.frame.shapes().toggle_all_shapes();
                true
            }
            _ => false,
        }
    }

    // ---- view ------------------------------------------------------------

    /// Scrolls so that particle `id` is in view. Returns true if the view
    /// moved.
    pub fn move_to(&mut self, id: ParticleId) -> Result<bool, ParticleError> {
        let (x, y) = self.micrograph.particles().require(id)?.position();
        Ok(self.recenter(x, y))
    }

    /// Recenters the view on an image point. Returns true if the view moved.
    pub fn recenter(&mut self, x: i32, y: i32) -> bool {
        if !self.view.recenter(x, y) {
            return false;
        }
        let source = self.view.source_rect();
        self.frame.events().publish(PickerEvent::View(ViewEvent::Recentered {
            x: source.x,
            y: source.y,
            width: source.width,
            height: source.height,
        }));
        true
    }

    pub fn set_magnification(&mut self, magnification: f64) -> Result<(), GeometryError> {
        self.view.set_magnification(magnification)?;
        self.display_zoom();
        Ok(())
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.view.zoom_in();
        if changed {
            self.display_zoom();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.view.zoom_out();
        if changed {
            self.display_zoom();
        }
        changed
    }

    /// Resizes the visible region for a widget of the given size.
    pub fn fit_to_view(&mut self, view_width: f64, view_height: f64) -> Result<(), GeometryError> {
        self.view.fit_to_view(view_width, view_height)
    }

    /// Loads another micrograph into this view. The magnification is kept,
    /// the active particle is cleared, and the previous micrograph is
    /// returned to the caller.
    pub fn switch_micrograph(&mut self, micrograph: Micrograph) -> Micrograph {
        tracing::info!(
            "switching micrograph {} -> {} ({})",
            self.micrograph.name(),
            micrograph.name(),
            micrograph.image()
        );
        self.motion.clear_active();
        self.view = self.view.rebased(*micrograph.image());
        let previous = std::mem::replace(&mut self.micrograph, micrograph);
        self.frame
            .events()
            .publish(PickerEvent::Session(SessionEvent::MicrographSwitched {
                name: self.micrograph.name().to_string(),
            }));
        previous
    }

    /// Marks the model changed and tells the frame to refresh its
    /// micrograph list.
    pub fn refresh(&mut self) {
        self.frame.mark_changed();
        self.frame
            .events()
            .publish(PickerEvent::Session(SessionEvent::ModelChanged {
                micrograph: self.micrograph.name().to_string(),
            }));
    }

    // ---- rendering geometry ---------------------------------------------

    /// Reference line for `alpha`, in image space and mapped into the view.
    pub fn reference_line(
        &self,
        alpha: f64,
    ) -> Result<(ReferenceLine, ViewSegment), GeometryError> {
        let line = ReferenceLine::through_center(alpha, self.micrograph.image())?;
        Ok((line, self.view.line_to_view(&line)))
    }

    /// Overlay of one particle; `show_all` draws every shape kind.
    pub fn overlay_for(&self, id: ParticleId, show_all: bool) -> Option<ParticleOverlay> {
        let particle = self.micrograph.particles().get(id)?;
        Some(self.overlay(particle, show_all))
    }

    /// Overlays of every particle in pick order, using the shared shape
    /// selection.
    pub fn overlays(&self) -> Vec<ParticleOverlay> {
        self.micrograph
            .particles()
            .iter()
            .map(|p| self.overlay(p, false))
            .collect()
    }

    fn overlay(&self, particle: &Particle, show_all: bool) -> ParticleOverlay {
        let mut overlay = particle_overlay(
            &self.view,
            particle,
            self.frame.shapes().selection(),
            show_all,
            self.frame.cross_half_length(),
        );
        overlay.active = self.motion.active() == Some(particle.id);
        overlay
    }

    fn display_zoom(&self) {
        self.frame.events().publish(PickerEvent::View(ViewEvent::ZoomChanged {
            magnification: self.view.magnification(),
        }));
    }
}

impl AnnotationCanvas for PickingCanvas {
    fn active(&self) -> Option<&Particle> {
        self.motion.active_particle(self.micrograph.particles())
    }

    fn refresh_active(&mut self, id: ParticleId) {
        if self.micrograph.particles().contains(id) {
            if let Err(e) = self.motion.select_particle(self.micrograph.particles(), id) {
                tracing::warn!("refresh could not select {}: {}", id, e);
            }
        }
        self.refresh();
    }

    fn frame_context(&self) -> &FrameContext {
        &self.frame
    }

    fn micrograph(&self) -> &Micrograph {
        &self.micrograph
    }
}
