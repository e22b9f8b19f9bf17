//! # ParticlePick
//!
//! View/model engine for manual particle picking on electron micrographs.
//! It owns the geometry a picking canvas needs and leaves drawing and event
//! wiring to whatever GUI toolkit hosts it:
//! - image ⇄ view mapping over a source rectangle and a magnification
//! - recentring the view on a particle without leaving the image
//! - the reference (symmetry) line through the image centre
//! - keyboard nudging of the active particle
//! - the shape selection shared by every view of a session
//!
//! ## Architecture
//!
//! 1. **particlepick-core** - image extent, particles, errors, event bus
//! 2. **particlepick-settings** - configuration file handling
//! 3. **particlepick-viewer** - viewport, reference line, motion, canvases
//! 4. **particlepick** - this facade plus logging setup

pub use particlepick_core::{
    Error, EventBus, EventBusConfig, EventCategory, EventFilter, GeometryError, ImageSource,
    ImageSpace, Particle, ParticleError, ParticleEvent, ParticleFamily, ParticleId,
    ParticleStore, PickerEvent, Result, SessionEvent, ShapeKind, ShapeSet, SubscriptionId,
    ViewEvent,
};

pub use particlepick_settings::{ConfigError, PickerConfig, SettingsError, SettingsResult};

pub use particlepick_viewer::{
    particle_overlay, AnnotationCanvas, Direction, FrameContext, KeyIntent, Micrograph,
    ParticleMotionController, ParticleOverlay, PickingCanvas, ReferenceLine, ShapeController,
    ShapeSelectionPolicy, SourceRect, ViewRect, ViewSegment, ViewTransform, ZOOM_LEVELS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("PARTICLEPICK_BUILD_DATE");

/// Initialize logging for a host application
///
/// Installs a global subscriber with:
/// - `RUST_LOG` filtering, INFO by default
/// - a stderr fmt layer with target, level and line numbers
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("particlepick {} (built {})", VERSION, BUILD_DATE);
    Ok(())
}
