//! View-space geometry of the annotation shapes around a particle.
//!
//! Nothing here draws; the GUI turns these rectangles and segments into
//! toolkit calls.

use particlepick_core::{Particle, ParticleId, ShapeKind, ShapeSet};

use crate::viewport::ViewTransform;

/// Axis-aligned rectangle in view pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Straight segment in view pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Shapes to draw for one particle. A shape is `None` when it is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleOverlay {
    pub id: ParticleId,
    pub active: bool,
    pub rectangle: Option<ViewRect>,
    /// Bounding box of the circle
    pub circle: Option<ViewRect>,
    /// Vertical then horizontal arm of the centre cross
    pub cross: Option<[ViewSegment; 2]>,
}

impl ParticleOverlay {
    pub fn is_empty(&self) -> bool {
        self.rectangle.is_none() && self.circle.is_none() && self.cross.is_none()
    }
}

/// Computes the overlay of `particle` in the given view.
///
/// The family box (`size` image pixels, centred on the particle) gives the
/// rectangle and the circle's bounds. The cross arms extend
/// `cross_half_length` image pixels each way. `show_all` forces every shape
/// regardless of `shapes`.
pub fn particle_overlay(
    view: &ViewTransform,
    particle: &Particle,
    shapes: ShapeSet,
    show_all: bool,
    cross_half_length: f64,
) -> ParticleOverlay {
    let magnification = view.magnification();
    let (cx, cy) = view.image_to_view(particle.x as f64, particle.y as f64);
    let radius = particle.family.radius() * magnification;
    let side = particle.family.size() as f64 * magnification;
    let arm = cross_half_length * magnification;

    let shown = |kind: ShapeKind| show_all || shapes.contains(kind);
    let bounds = ViewRect {
        x: cx - radius,
        y: cy - radius,
        width: side,
        height: side,
    };

    ParticleOverlay {
        id: particle.id,
        active: false,
        rectangle: shown(ShapeKind::Rectangle).then_some(bounds),
        circle: shown(ShapeKind::Circle).then_some(bounds),
        cross: shown(ShapeKind::Center).then_some([
            ViewSegment {
                x1: cx,
                y1: cy - arm,
                x2: cx,
                y2: cy + arm,
            },
            ViewSegment {
                x1: cx + arm,
                y1: cy,
                x2: cx - arm,
                y2: cy,
            },
        ]),
    }
}
