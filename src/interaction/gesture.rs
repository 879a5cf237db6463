//! Tap versus drag classification for single-point touch sequences

use crate::platform::{ElementId, TouchPoint};

/// Default per-axis movement, in logical pixels, after which a touch is a drag
pub const DEFAULT_MOVE_THRESHOLD: f64 = 10.0;

/// State of one live touch sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Where the finger went down
    pub origin: TouchPoint,
    /// Whether the finger has travelled past the threshold
    pub moved: bool,
    /// Element the touch started on
    pub target: ElementId,
}

/// Result of a finished touch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchClassification {
    /// The sequence never moved past the threshold
    pub is_tap: bool,
}

/// Classifies touch sequences with a fixed movement threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    threshold: f64,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_THRESHOLD)
    }
}

impl GestureClassifier {
    /// Classifier with the given per-axis threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Movement threshold in logical pixels
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Open a session for a touch starting on `target`
    pub fn on_touch_start(&self, target: ElementId, point: TouchPoint) -> GestureSession {
        GestureSession {
            origin: point,
            moved: false,
            target,
        }
    }

    /// Fold a move into the session. Once moved, a session stays moved.
    pub fn on_touch_move(&self, session: GestureSession, point: TouchPoint) -> GestureSession {
        let dx = (point.x - session.origin.x).abs();
        let dy = (point.y - session.origin.y).abs();
        GestureSession {
            moved: session.moved || dx > self.threshold || dy > self.threshold,
            ..session
        }
    }

    /// Close the session
    pub fn on_touch_end(&self, session: GestureSession) -> TouchClassification {
        TouchClassification {
            is_tap: !session.moved,
        }
    }
}
