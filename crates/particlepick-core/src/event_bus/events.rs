//! Event type definitions for the event bus.
//!
//! Events tell dependents (secondary particle views, the frame's zoom label,
//! the micrograph list) that something they display went stale.

use serde::{Deserialize, Serialize};

use crate::particle::ParticleId;
use crate::shapes::ShapeSet;

/// Root event enum for all picker events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PickerEvent {
    /// Particle position and selection
    Particle(ParticleEvent),
    /// Viewport and overlay state
    View(ViewEvent),
    /// Session-wide model state
    Session(SessionEvent),
}

impl PickerEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            PickerEvent::Particle(_) => EventCategory::Particle,
            PickerEvent::View(_) => EventCategory::View,
            PickerEvent::Session(_) => EventCategory::Session,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            PickerEvent::Particle(e) => e.description(),
            PickerEvent::View(e) => e.description(),
            PickerEvent::Session(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Particle events.
    Particle,
    /// View events.
    View,
    /// Session events.
    Session,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Particle => write!(f, "Particle"),
            EventCategory::View => write!(f, "View"),
            EventCategory::Session => write!(f, "Session"),
        }
    }
}

/// Particle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParticleEvent {
    /// A particle changed position; views showing it must repaint
    Moved { id: ParticleId, x: i32, y: i32 },
    /// The active particle changed (`None` when cleared)
    ActiveChanged { id: Option<ParticleId> },
}

impl ParticleEvent {
    pub fn description(&self) -> String {
        match self {
            ParticleEvent::Moved { id, x, y } => format!("Particle {} moved to ({}, {})", id, x, y),
            ParticleEvent::ActiveChanged { id: Some(id) } => format!("Active particle {}", id),
            ParticleEvent::ActiveChanged { id: None } => "Active particle cleared".to_string(),
        }
    }
}

/// View events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// The visible source rectangle moved
    Recentered {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// Magnification changed; the frame refreshes its zoom display
    ZoomChanged { magnification: f64 },
    /// The shared shape selection changed
    ShapesToggled { shapes: ShapeSet },
}

impl ViewEvent {
    pub fn description(&self) -> String {
        match self {
            ViewEvent::Recentered {
                x,
                y,
                width,
                height,
            } => format!("View moved to {}x{} at ({}, {})", width, height, x, y),
            ViewEvent::ZoomChanged { magnification } => {
                format!("Zoom {:.0}%", magnification * 100.0)
            }
            ViewEvent::ShapesToggled { shapes } => format!("Shapes shown: {:?}", shapes.kinds()),
        }
    }
}

/// Session events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Particles of the current micrograph changed; the session is dirty
    ModelChanged { micrograph: String },
    /// Another micrograph was loaded into the view
    MicrographSwitched { name: String },
}

impl SessionEvent {
    pub fn description(&self) -> String {
        match self {
            SessionEvent::ModelChanged { micrograph } => format!("Model changed: {}", micrograph),
            SessionEvent::MicrographSwitched { name } => format!("Switched to micrograph {}", name),
        }
    }
}
