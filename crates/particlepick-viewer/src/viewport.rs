//! Viewport and coordinate transformation for the picking canvas.
//!
//! The view shows a sub-rectangle of the micrograph (the source rectangle)
//! scaled by a magnification factor. Image coordinates are pixels of the
//! micrograph; view coordinates are pixels of the widget, (0,0) at the
//! top-left of the visible region. Both axes grow right/down, so there is no
//! axis flip.

use serde::{Deserialize, Serialize};
use std::fmt;

use particlepick_core::{GeometryError, ImageSpace};

use crate::overlay::ViewSegment;
use crate::reference_line::ReferenceLine;

/// Zoom ladder walked by [`ViewTransform::zoom_in`] and
/// [`ViewTransform::zoom_out`].
pub const ZOOM_LEVELS: [f64; 23] = [
    1.0 / 72.0,
    1.0 / 48.0,
    1.0 / 32.0,
    1.0 / 24.0,
    1.0 / 16.0,
    1.0 / 12.0,
    1.0 / 8.0,
    1.0 / 6.0,
    1.0 / 4.0,
    1.0 / 3.0,
    1.0 / 2.0,
    0.75,
    1.0,
    1.5,
    2.0,
    3.0,
    4.0,
    6.0,
    8.0,
    12.0,
    16.0,
    24.0,
    32.0,
];

/// Visible region of the image, in image pixels.
///
/// Once accepted by a [`ViewTransform`] it always lies inside the image:
/// `x >= 0`, `y >= 0`, `x + width <= image width`, `y + height <= image height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SourceRect {
    /// Creates a rectangle, rejecting non-positive extents.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, GeometryError> {
        if width <= 0 || height <= 0 {
            return Err(GeometryError::invalid(format!(
                "source rectangle must have positive size, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Whole-image rectangle.
    pub fn full(image: &ImageSpace) -> Self {
        Self {
            x: 0,
            y: 0,
            width: image.width(),
            height: image.height(),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Inclusive containment: a rectangle sharing an edge still counts.
    pub fn contains_rect(&self, other: &SourceRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64 && y >= self.y as f64 && x < self.right() as f64 && y < self.bottom() as f64
    }

    pub fn fits_in(&self, image: &ImageSpace) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= image.width() && self.bottom() <= image.height()
    }
}

/// Maps between image pixels and view pixels for one open view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    image: ImageSpace,
    source: SourceRect,
    magnification: f64,
}

impl ViewTransform {
    /// Creates a view showing the whole image at the given magnification.
    pub fn new(image: ImageSpace, magnification: f64) -> Result<Self, GeometryError> {
        Self::with_source_rect(image, SourceRect::full(&image), magnification)
    }

    /// Creates a view over an explicit source rectangle.
    pub fn with_source_rect(
        image: ImageSpace,
        source: SourceRect,
        magnification: f64,
    ) -> Result<Self, GeometryError> {
        check_magnification(magnification)?;
        check_source(&source, &image)?;
        Ok(Self {
            image,
            source,
            magnification,
        })
    }

    /// Builds a view of another image keeping this view's magnification,
    /// origin and source size, shrunk and clamped to fit the new image.
    pub fn rebased(&self, image: ImageSpace) -> Self {
        let width = self.source.width.min(image.width());
        let height = self.source.height.min(image.height());
        let source = SourceRect {
            x: clamp_origin(self.source.x, width, image.width()),
            y: clamp_origin(self.source.y, height, image.height()),
            width,
            height,
        };
        Self {
            image,
            source,
            magnification: self.magnification,
        }
    }

    pub fn image(&self) -> &ImageSpace {
        &self.image
    }

    pub fn source_rect(&self) -> SourceRect {
        self.source
    }

    /// Replaces the visible rectangle; it must lie inside the image.
    pub fn set_source_rect(&mut self, source: SourceRect) -> Result<(), GeometryError> {
        check_source(&source, &self.image)?;
        self.source = source;
        Ok(())
    }

    /// Gets the current magnification (1.0 = 100%).
    pub fn magnification(&self) -> f64 {
        self.magnification
    }

    /// Magnification as a percentage, for the frame's zoom display.
    pub fn zoom_percent(&self) -> f64 {
        self.magnification * 100.0
    }

    /// Replaces the magnification. The source rectangle is left alone; the
    /// caller decides whether to also recenter or refit.
    pub fn set_magnification(&mut self, magnification: f64) -> Result<(), GeometryError> {
        check_magnification(magnification)?;
        self.magnification = magnification;
        tracing::debug!("magnification set to {:.4}", magnification);
        Ok(())
    }

    /// Steps up the zoom ladder. Returns false when already at the top.
    pub fn zoom_in(&mut self) -> bool {
        match ZOOM_LEVELS.iter().find(|&&level| level > self.magnification) {
            Some(&level) => {
                self.magnification = level;
                true
            }
            None => false,
        }
    }

    /// Steps down the zoom ladder. Returns false when already at the bottom.
    pub fn zoom_out(&mut self) -> bool {
        match ZOOM_LEVELS.iter().rev().find(|&&level| level < self.magnification) {
            Some(&level) => {
                self.magnification = level;
                true
            }
            None => false,
        }
    }

    /// Converts image coordinates to view coordinates.
    ///
    /// ```text
    /// view_x = (image_x - source.x) * magnification
    /// view_y = (image_y - source.y) * magnification
    /// ```
    ///
    /// No bounds checking: points outside the visible region map outside
    /// the view.
    pub fn image_to_view(&self, image_x: f64, image_y: f64) -> (f64, f64) {
        (
            (image_x - self.source.x as f64) * self.magnification,
            (image_y - self.source.y as f64) * self.magnification,
        )
    }

    /// Converts view coordinates back to image coordinates (hit-testing).
    pub fn view_to_image(&self, view_x: f64, view_y: f64) -> (f64, f64) {
        (
            view_x / self.magnification + self.source.x as f64,
            view_y / self.magnification + self.source.y as f64,
        )
    }

    /// Maps both endpoints of an image-space line into view space.
    pub fn line_to_view(&self, line: &ReferenceLine) -> ViewSegment {
        let (x1, y1) = self.image_to_view(line.x1, line.y1);
        let (x2, y2) = self.image_to_view(line.x2, line.y2);
        ViewSegment { x1, y1, x2, y2 }
    }

    /// Size of the visible region in view pixels.
    pub fn view_size(&self) -> (f64, f64) {
        (
            self.source.width as f64 * self.magnification,
            self.source.height as f64 * self.magnification,
        )
    }

    /// Centers the source rectangle on an image point, keeping its size.
    ///
    /// The origin is clamped so the rectangle stays inside the image; on an
    /// axis where the rectangle spans the whole image the origin is 0. When
    /// the current rectangle already contains the clamped one (inclusive at
    /// the edges) nothing moves, so a point that is already in view never
    /// makes the view jitter.
    ///
    /// Returns true if the source rectangle changed and the view needs a
    /// repaint.
    pub fn recenter(&mut self, target_x: i32, target_y: i32) -> bool {
        let width = self.source.width;
        let height = self.source.height;
        let candidate = SourceRect {
            x: clamp_origin(target_x.saturating_sub(width / 2), width, self.image.width()),
            y: clamp_origin(target_y.saturating_sub(height / 2), height, self.image.height()),
            width,
            height,
        };

        if self.source.contains_rect(&candidate) {
            tracing::trace!("recenter on ({}, {}) keeps current view", target_x, target_y);
            return false;
        }

        tracing::debug!(
            "recenter on ({}, {}): source ({}, {}) -> ({}, {})",
            target_x,
            target_y,
            self.source.x,
            self.source.y,
            candidate.x,
            candidate.y
        );
        self.source = candidate;
        true
    }

    /// Resizes the source rectangle to what a widget of the given size shows
    /// at the current magnification, keeping the origin where possible.
    pub fn fit_to_view(&mut self, view_width: f64, view_height: f64) -> Result<(), GeometryError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(view_width) || !valid(view_height) {
            return Err(GeometryError::invalid(format!(
                "view size must be positive, got {}x{}",
                view_width, view_height
            )));
        }
        let width = visible_extent(view_width, self.magnification, self.image.width());
        let height = visible_extent(view_height, self.magnification, self.image.height());
        self.source = SourceRect {
            x: clamp_origin(self.source.x, width, self.image.width()),
            y: clamp_origin(self.source.y, height, self.image.height()),
            width,
            height,
        };
        Ok(())
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Source: {}x{} at ({}, {})",
            self.zoom_percent(),
            self.source.width,
            self.source.height,
            self.source.x,
            self.source.y
        )
    }
}

fn check_magnification(magnification: f64) -> Result<(), GeometryError> {
    if !magnification.is_finite() || magnification <= 0.0 {
        return Err(GeometryError::invalid(format!(
            "magnification must be > 0, got {}",
            magnification
        )));
    }
    Ok(())
}

fn check_source(source: &SourceRect, image: &ImageSpace) -> Result<(), GeometryError> {
    if source.width <= 0 || source.height <= 0 {
        return Err(GeometryError::invalid(format!(
            "source rectangle must have positive size, got {}x{}",
            source.width, source.height
        )));
    }
    if !source.fits_in(image) {
        return Err(GeometryError::invalid(format!(
            "source rectangle {}x{} at ({}, {}) leaves image {}",
            source.width, source.height, source.x, source.y, image
        )));
    }
    Ok(())
}

/// Clamps a rectangle origin so `[origin, origin + extent)` stays in
/// `[0, limit)`; 0 when the extent covers the whole axis.
fn clamp_origin(origin: i32, extent: i32, limit: i32) -> i32 {
    let mut origin = origin;
    if origin.saturating_add(extent) > limit {
        origin = limit - extent;
    }
    if origin < 0 {
        origin = 0;
    }
    origin
}

fn visible_extent(view_extent: f64, magnification: f64, limit: i32) -> i32 {
    let extent = (view_extent / magnification).ceil();
    if extent >= limit as f64 {
        limit
    } else {
        (extent as i32).max(1)
    }
}
