//! Shared interaction state
//!
//! One context is injected into every component that needs the gate or the
//! pressed element, instead of keeping them as globals.

use crate::interaction::gate::ActivationGate;
use crate::interaction::gesture::GestureSession;
use crate::platform::{Clock, ElementId, Surface};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Gate, live gesture and pressed element shared by all bindings
#[derive(Debug)]
pub struct InteractionContext {
    clock: Arc<dyn Clock>,
    gate: ActivationGate,
    session: Option<GestureSession>,
    pressed: Option<ElementId>,
    pressed_class: String,
}

impl InteractionContext {
    /// Fresh context reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>, gate: ActivationGate, pressed_class: impl Into<String>) -> Self {
        Self {
            clock,
            gate,
            session: None,
            pressed: None,
            pressed_class: pressed_class.into(),
        }
    }

    /// Current monotonic time
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// The activation gate
    pub fn gate(&self) -> &ActivationGate {
        &self.gate
    }

    /// Enter the gate at the current time
    pub fn try_enter(&mut self) -> bool {
        let now = self.now();
        self.gate.try_enter(now)
    }

    /// Leave the gate after an activation ran
    pub fn leave(&mut self) {
        self.gate.leave();
    }

    /// The live touch sequence, if any
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub(crate) fn replace_session(&mut self, session: GestureSession) -> Option<GestureSession> {
        self.session.replace(session)
    }

    pub(crate) fn take_session(&mut self) -> Option<GestureSession> {
        self.session.take()
    }

    /// Element showing the pressed style
    pub fn pressed(&self) -> Option<ElementId> {
        self.pressed
    }

    /// Class marking the pressed element
    pub fn pressed_class(&self) -> &str {
        &self.pressed_class
    }

    /// Move the pressed style to `element`
    pub fn press(&mut self, surface: &mut dyn Surface, element: ElementId) {
        if let Some(previous) = self.pressed.replace(element) {
            if previous != element {
                surface.remove_class(previous, &self.pressed_class);
            }
        }
        surface.add_class(element, &self.pressed_class);
    }

    /// Remove the pressed style from whichever element carries it
    pub fn clear_pressed(&mut self, surface: &mut dyn Surface) {
        if let Some(element) = self.pressed.take() {
            surface.remove_class(element, &self.pressed_class);
        }
    }

    /// Unconditionally clear the gate, the pressed element and any live gesture.
    ///
    /// Used when the page is shown again or the window gains or loses focus,
    /// since a gesture that started before may never deliver its end event.
    pub fn reset(&mut self, surface: &mut dyn Surface) {
        debug!(
            "Resetting interaction state (locked: {}, pressed: {:?})",
            self.gate.is_locked(),
            self.pressed
        );
        self.gate.force_reset();
        self.session = None;
        self.clear_pressed(surface);
    }
}
