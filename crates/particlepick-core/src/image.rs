//! Image dimensions of the micrograph under annotation.
//!
//! Pixel storage and decoding belong to the external image library. The core
//! only needs the extent of the image, read once through [`ImageSource`].

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Metadata provider for a loaded image.
///
/// Implemented by whatever wraps the native image library. Dimensions are
/// signed to match the coordinate arithmetic done on them.
pub trait ImageSource {
    /// Width in pixels.
    fn width(&self) -> i32;
    /// Height in pixels.
    fn height(&self) -> i32;
    /// Number of slices (1 for a plain micrograph).
    fn depth(&self) -> i32;
    /// Number of images in the file (stacks hold several).
    fn n_images(&self) -> u64;
}

/// Extent of the current micrograph in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSpace {
    width: i32,
    height: i32,
    depth: i32,
    n_images: u64,
}

impl ImageSpace {
    /// Creates a single-image space, rejecting non-positive dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, GeometryError> {
        Self::with_depth(width, height, 1, 1)
    }

    /// Creates a space with explicit depth and image count.
    pub fn with_depth(
        width: i32,
        height: i32,
        depth: i32,
        n_images: u64,
    ) -> Result<Self, GeometryError> {
        if width <= 0 || height <= 0 {
            return Err(GeometryError::invalid(format!(
                "image dimensions must be > 0, got {}x{}",
                width, height
            )));
        }
        if depth < 1 {
            return Err(GeometryError::invalid(format!(
                "image depth must be >= 1, got {}",
                depth
            )));
        }
        if n_images < 1 {
            return Err(GeometryError::invalid("image count must be >= 1"));
        }
        Ok(Self {
            width,
            height,
            depth,
            n_images,
        })
    }

    /// Reads the dimensions from an external image.
    pub fn from_source(source: &dyn ImageSource) -> Result<Self, GeometryError> {
        Self::with_depth(
            source.width(),
            source.height(),
            source.depth(),
            source.n_images(),
        )
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn n_images(&self) -> u64 {
        self.n_images
    }

    /// Image centre in continuous pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// True if the pixel lies inside `[0,width) x [0,height)`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

impl std::fmt::Display for ImageSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.depth > 1 || self.n_images > 1 {
            write!(
                f,
                "{}x{}x{} ({} images)",
                self.width, self.height, self.depth, self.n_images
            )
        } else {
            write!(f, "{}x{}", self.width, self.height)
        }
    }
}
