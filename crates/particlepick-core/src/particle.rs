//! Particles, particle families, and the per-micrograph particle store.
//!
//! Particles are addressed by [`ParticleId`] rather than by reference so the
//! store can insert and remove freely without invalidating whoever holds an
//! id (the active-particle controller in particular).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ParticleError;

/// Stable identifier of a particle within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u64);

impl std::fmt::Display for ParticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Size and naming metadata shared by every particle of one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleFamily {
    name: String,
    size: i32,
}

impl ParticleFamily {
    /// Creates a family with a box size in image pixels.
    pub fn new(name: impl Into<String>, size: i32) -> Result<Self, ParticleError> {
        let name = name.into();
        if size <= 0 {
            return Err(ParticleError::InvalidFamilySize { family: name, size });
        }
        Ok(Self { name, size })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Box size in image pixels.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Half the box size, in image pixels.
    pub fn radius(&self) -> f64 {
        self.size as f64 / 2.0
    }
}

/// A picked particle. Position is in image pixels and may lie outside the
/// image: nudging off-canvas is allowed and corrected later by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub x: i32,
    pub y: i32,
    pub family: Arc<ParticleFamily>,
}

impl Particle {
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// True if the image point falls inside this particle's family box.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        let r = self.family.radius();
        let (cx, cy) = (self.x as f64, self.y as f64);
        px >= cx - r && px <= cx + r && py >= cy - r && py <= cy + r
    }
}

/// Particles of one micrograph, in pick order.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: HashMap<ParticleId, Particle>,
    order: Vec<ParticleId>,
    next_id: u64,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a particle and returns its id. Ids are never reused.
    pub fn add(&mut self, x: i32, y: i32, family: Arc<ParticleFamily>) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.insert(
            id,
            Particle {
                id,
                x,
                y,
                family,
            },
        );
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let removed = self.particles.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(removed)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(&id)
    }

    /// Like [`get`](Self::get) but reports a missing id as an error.
    pub fn require(&self, id: ParticleId) -> Result<&Particle, ParticleError> {
        self.get(id).ok_or(ParticleError::UnknownParticle { id })
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.particles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates in pick order (oldest first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Particle> + '_ {
        self.order.iter().filter_map(move |id| self.particles.get(id))
    }

    /// Topmost (most recently picked) particle whose box contains the point.
    pub fn particle_at(&self, px: f64, py: f64) -> Option<ParticleId> {
        self.iter()
            .rev()
            .find(|p| p.contains_point(px, py))
            .map(|p| p.id)
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.order.clear();
    }
}
