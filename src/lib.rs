//! `Junkyard` - touch/pointer interaction core for a filterable link gallery
//!
//! Guarantees exactly one logical activation per user gesture whether the platform
//! delivers `click`, a touch sequence, or both, and sequences the exit/enter
//! animation when the visible card set changes. The DOM is an external collaborator
//! reached through the [`platform::Surface`] trait; time and frames are driven by the
//! host through [`controller::GalleryController`].
//!
//! # Layout
//!
//! - [`interaction`]: gesture classification, activation gate, device mode, binder
//! - [`controller`]: filter state and card transition sequencing
//! - [`platform`]: clock, task queue, surface and event seams
//! - [`data`]: tags, cards and catalog loading
//! - [`config`]: tunable delays and thresholds

// Module declarations
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod interaction;
pub mod platform;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{JunkyardError, Result};
