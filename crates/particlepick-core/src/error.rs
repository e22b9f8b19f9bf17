//! Error handling for ParticlePick
//!
//! Provides error types for the coordinate engine and the particle model:
//! - Geometry errors (view construction, magnification, reference line)
//! - Particle errors (stale or unknown particle identifiers)
//!
//! All error types use `thiserror` for ergonomic error handling. A missing
//! active particle is deliberately absent from this list: operations that
//! need one degrade to a no-op instead.

use thiserror::Error;

use crate::particle::ParticleId;

/// Geometry error type
///
/// Raised when a view or a derived shape cannot be built from the supplied
/// numbers. The caller must not go on rendering with the rejected values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Non-positive dimensions, non-positive magnification, or a source
    /// rectangle that leaves the image
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// What was wrong with the input.
        reason: String,
    },

    /// The reference line slope is zero or not finite for this angle
    #[error("Degenerate reference line angle: {alpha} rad")]
    DegenerateAngle {
        /// The rejected rotation angle in radians.
        alpha: f64,
    },
}

impl GeometryError {
    /// Shorthand for [`GeometryError::InvalidGeometry`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Particle error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParticleError {
    /// The identifier does not name a particle of the current micrograph
    #[error("Unknown particle {id}")]
    UnknownParticle {
        /// The identifier that was looked up.
        id: ParticleId,
    },

    /// Family size must be a positive pixel count
    #[error("Invalid size {size} for particle family '{family}'")]
    InvalidFamilySize {
        /// The family name.
        family: String,
        /// The rejected size.
        size: i32,
    },
}

/// Main error type for ParticlePick
///
/// A unified error type that can represent any error from the core crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Particle error
    #[error(transparent)]
    Particle(#[from] ParticleError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a particle error
    pub fn is_particle_error(&self) -> bool {
        matches!(self, Error::Particle(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
