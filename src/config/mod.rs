//! Configuration management module
//!
//! This module handles loading and saving the tunable delays, thresholds and
//! class names. Configuration is stored in `$JUNKYARD_HOME/config.json` with
//! atomic writes to prevent corruption.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{AppConfig, GalleryConfig, InteractionConfig, LoggingConfig};
