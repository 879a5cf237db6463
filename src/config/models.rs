//! Configuration data models
//!
//! The numeric defaults are tuned for perceived responsiveness against
//! duplicate-event suppression and should only be changed deliberately.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture and activation gate tuning
    pub interaction: InteractionConfig,
    /// Card transition tuning
    pub gallery: GalleryConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

/// Gesture and activation gate tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Window in which a second activation is treated as a duplicate
    pub cooldown_ms: u64,
    /// Delay between a confirmed tap and its activation
    pub touch_delay_ms: u64,
    /// Per-axis movement in logical pixels after which a touch is a drag
    pub move_threshold_px: f64,
    /// Class applied to an element while a finger is down on it
    pub pressed_class: String,
}

/// Card transition tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Duration of the exit animation before the card set is swapped
    pub animation_duration_ms: u64,
    /// Label of the synthetic tag that shows every card
    pub all_tag_label: String,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    /// Number of previous session logs kept next to the current one
    pub max_log_files: u8,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 50,
            touch_delay_ms: 150,
            move_threshold_px: 10.0,
            pressed_class: "touch".to_string(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: 250,
            all_tag_label: "All".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            max_log_files: 9,
        }
    }
}

impl InteractionConfig {
    /// Duplicate-suppression window
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Touch-confirmation delay
    pub fn touch_delay(&self) -> Duration {
        Duration::from_millis(self.touch_delay_ms)
    }
}

impl GalleryConfig {
    /// Exit animation wait
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}

impl AppConfig {
    /// Replace values that would break the state machines with their defaults.
    ///
    /// Returns `true` if anything was changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        let defaults = InteractionConfig::default();

        let threshold = self.interaction.move_threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            warn!(
                "Invalid move threshold {}, using {}",
                threshold, defaults.move_threshold_px
            );
            self.interaction.move_threshold_px = defaults.move_threshold_px;
            changed = true;
        }

        if self.interaction.pressed_class.trim().is_empty() {
            warn!("Empty pressed class, using '{}'", defaults.pressed_class);
            self.interaction.pressed_class = defaults.pressed_class;
            changed = true;
        }

        if self.gallery.all_tag_label.trim().is_empty() {
            let label = GalleryConfig::default().all_tag_label;
            warn!("Empty 'all' tag label, using '{}'", label);
            self.gallery.all_tag_label = label;
            changed = true;
        }

        changed
    }
}
