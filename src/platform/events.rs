//! Raw platform events delivered by the host

use crate::platform::surface::ElementId;
use serde::{Deserialize, Serialize};

/// Single touch point in logical (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl TouchPoint {
    /// Point at `(x, y)`
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Events the host forwards to the controller
///
/// Touch end and cancel carry an optional target: `None` means the event only
/// reached the document (the element was removed mid-gesture, for example).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformEvent {
    /// First finger down on an element
    TouchStart {
        /// Element under the finger
        target: ElementId,
        /// Touch position
        point: TouchPoint,
    },
    /// Finger moved
    TouchMove {
        /// Element the touch started on
        target: ElementId,
        /// Touch position
        point: TouchPoint,
    },
    /// Finger lifted
    TouchEnd {
        /// Element the touch started on, if it still exists
        target: Option<ElementId>,
    },
    /// Touch sequence interrupted by the platform
    TouchCancel {
        /// Element the touch started on, if it still exists
        target: Option<ElementId>,
    },
    /// Click, native or synthesized after a tap
    Click {
        /// Clicked element
        target: ElementId,
    },
    /// Pointer entered an element
    PointerEnter {
        /// Hovered element
        target: ElementId,
    },
    /// Pointer left an element
    PointerLeave {
        /// Previously hovered element
        target: ElementId,
    },
    /// Page visibility changed
    VisibilityChanged {
        /// Whether the page is visible now
        visible: bool,
    },
    /// Window lost focus
    WindowBlur,
    /// Window gained focus
    WindowFocus,
    /// The `(pointer: coarse)` capability toggled
    PointerCapabilityChanged {
        /// New capability value
        coarse: bool,
    },
}

/// What the host should do with the native event after the core handled it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    /// Cancel the default action (link navigation)
    pub prevent_default: bool,
    /// Stop the event from reaching ancestor listeners
    pub stop_propagation: bool,
}

impl EventOutcome {
    /// Let the event proceed untouched
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Swallow the event entirely
    pub const SUPPRESS: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}
