//! Reference (symmetry) line through the image centre.
//!
//! The line is an alignment aid drawn over the micrograph. It is derived from
//! a rotation angle on demand and never stored.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use particlepick_core::{GeometryError, ImageSpace};

/// Line endpoints in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ReferenceLine {
    /// Line through the centre of `image`, oriented by `alpha` radians
    /// measured from the vertical.
    pub fn through_center(alpha: f64, image: &ImageSpace) -> Result<Self, GeometryError> {
        Self::for_size(alpha, image.width() as f64, image.height() as f64)
    }

    /// Same as [`through_center`](Self::through_center) for a raw
    /// `width x height` extent.
    ///
    /// The line leaves the image through whichever pair of edges it meets
    /// first. With `m = tan(alpha - pi/2)`:
    ///
    /// ```text
    /// alpha == pi/2       : (0, H/2)              -> (W, H/2)
    /// |(H/2)/m| >  W/2    : (W, H/2 - m*W/2)      -> (0, H/2 + m*W/2)
    /// |(H/2)/m| <= W/2    : ((H/2)/m + W/2, 0)    -> (-(H/2)/m + W/2, H)
    /// ```
    ///
    /// Any other angle giving a zero or non-finite slope is rejected before
    /// dividing by it.
    pub fn for_size(alpha: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        if !alpha.is_finite() {
            return Err(GeometryError::DegenerateAngle { alpha });
        }

        let half_w = width / 2.0;
        let half_h = height / 2.0;

        if alpha == FRAC_PI_2 {
            return Ok(Self {
                x1: 0.0,
                y1: half_h,
                x2: width,
                y2: half_h,
            });
        }

        let m = (alpha - FRAC_PI_2).tan();
        if m == 0.0 || !m.is_finite() {
            return Err(GeometryError::DegenerateAngle { alpha });
        }

        let x = half_h / m;
        let line = if x.abs() > half_w {
            // exits through the left and right edges
            Self {
                x1: width,
                y1: half_h - m * half_w,
                x2: 0.0,
                y2: half_h - m * -half_w,
            }
        } else {
            // exits through the top and bottom edges
            Self {
                x1: x + half_w,
                y1: 0.0,
                x2: -x + half_w,
                y2: height,
            }
        };
        Ok(line)
    }

    pub fn start(&self) -> (f64, f64) {
        (self.x1, self.y1)
    }

    pub fn end(&self) -> (f64, f64) {
        (self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}
