//! # ParticlePick Core
//!
//! Core types shared by the ParticlePick crates: the image extent, the
//! particle model, annotation shape kinds, the error taxonomy, and the event
//! bus used to tell dependents that something went stale.

pub mod error;
pub mod event_bus;
pub mod image;
pub mod particle;
pub mod shapes;

pub use error::{Error, GeometryError, ParticleError, Result};

pub use event_bus::{
    EventBus, EventBusConfig, EventCategory, EventFilter, ParticleEvent, PickerEvent,
    SessionEvent, SubscriptionId, ViewEvent,
};

pub use image::{ImageSource, ImageSpace};
pub use particle::{Particle, ParticleFamily, ParticleId, ParticleStore};
pub use shapes::{ShapeKind, ShapeSet};
