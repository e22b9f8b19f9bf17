//! # Event Bus Module
//!
//! Publish/subscribe between the picking canvas and its dependents:
//! - the canvas publishes typed events without knowing who listens
//! - dependents filter by category and repaint or refresh on delivery
//!
//! ## Usage
//!
//! ```rust
//! use particlepick_core::event_bus::{EventBus, EventCategory, EventFilter, PickerEvent};
//!
//! let bus = EventBus::new();
//! let sub = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Particle]),
//!     |event| {
//!         if let PickerEvent::Particle(p) = event {
//!             println!("{}", p.description());
//!         }
//!     },
//! );
//! bus.unsubscribe(sub);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
