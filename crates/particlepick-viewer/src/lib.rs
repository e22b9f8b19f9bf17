//! # ParticlePick Viewer
//!
//! The view/model engine behind the particle-picking canvas. It is
//! independent of any widget toolkit: the GUI hands in decoded intents and
//! gets back coordinates to draw.
//!
//! ## Components
//!
//! - **Viewport**: source rectangle + magnification, image ⇄ view mapping,
//!   recentring within the image, zoom ladder
//! - **Reference line**: symmetry line through the image centre for an angle
//! - **Motion**: the active particle and keyboard nudges
//! - **Shape policy**: which annotation shapes every view shows
//! - **Overlay**: view-space rectangles and segments for each particle
//! - **Canvas**: per-view glue implementing [`AnnotationCanvas`]
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use particlepick_core::{ImageSpace, ParticleFamily};
//! use particlepick_settings::PickerConfig;
//! use particlepick_viewer::{FrameContext, KeyIntent, Micrograph, PickingCanvas};
//!
//! let config = PickerConfig::default();
//! let frame = FrameContext::from_config(&config);
//! let micrograph = Micrograph::new("mic_001", ImageSpace::new(4096, 4096).unwrap());
//! let mut canvas = PickingCanvas::from_config(micrograph, &config, frame).unwrap();
//!
//! let family = Arc::new(ParticleFamily::new("ribosome", 64).unwrap());
//! let id = canvas.add_particle(1000, 1200, family);
//! canvas.select_particle(id).unwrap();
//! assert!(canvas.handle_key(KeyIntent::Right));
//! ```

pub mod canvas;
pub mod motion;
pub mod overlay;
pub mod reference_line;
pub mod shape_policy;
pub mod viewport;

pub use canvas::{AnnotationCanvas, FrameContext, KeyIntent, Micrograph, PickingCanvas};
pub use motion::{Direction, ParticleMotionController};
pub use overlay::{particle_overlay, ParticleOverlay, ViewRect, ViewSegment};
pub use reference_line::ReferenceLine;
pub use shape_policy::{ShapeController, ShapeSelectionPolicy};
pub use viewport::{SourceRect, ViewTransform, ZOOM_LEVELS};
