//! Per-element activation wiring
//!
//! Callers bind an element to an action value. Raw platform events go through
//! the binder, which runs them through the gesture classifier and the gate and
//! hands back the action when (and only when) a logical activation happened.
//!
//! Bindings live in a registry keyed by element id, so binding an element twice
//! replaces the first binding instead of stacking a second handler.

use crate::interaction::context::InteractionContext;
use crate::interaction::gesture::GestureClassifier;
use crate::interaction::mode::InteractionMode;
use crate::platform::{ElementId, EventOutcome, Surface, TouchPoint};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

/// Event set attached to a bound element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPath {
    /// touch-start/move/end with delayed confirmation
    Touch,
    /// Direct click
    Pointer,
}

impl From<InteractionMode> for ActivationPath {
    fn from(mode: InteractionMode) -> Self {
        match mode {
            InteractionMode::Touch => Self::Touch,
            InteractionMode::Pointer => Self::Pointer,
        }
    }
}

#[derive(Debug, Clone)]
struct Binding<A> {
    path: ActivationPath,
    action: A,
}

/// Result of a touch-end on a bound element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchEndOutcome<A> {
    /// Tap confirmed and gate entered. The caller runs `action` after `delay`
    /// and then leaves the gate.
    Confirmed {
        /// Bound action
        action: A,
        /// Touch-confirmation delay
        delay: Duration,
    },
    /// Tap, but another activation is in flight or just happened
    Suppressed,
    /// The finger moved past the threshold
    Rejected,
    /// Not a touch-bound element, or no session started on it
    Ignored,
}

/// Result of a click on a bound element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome<A> {
    /// Set when the gate was entered. The caller runs it and then leaves the gate.
    pub action: Option<A>,
    /// What to do with the native event
    pub event: EventOutcome,
}

impl<A> ClickOutcome<A> {
    fn pass() -> Self {
        Self {
            action: None,
            event: EventOutcome::PASS,
        }
    }
}

/// Registry of bound elements
#[derive(Debug)]
pub struct InteractionBinder<A> {
    mode: InteractionMode,
    classifier: GestureClassifier,
    touch_delay: Duration,
    bindings: HashMap<ElementId, Binding<A>>,
}

impl<A: Clone> InteractionBinder<A> {
    /// Empty registry attaching paths for `mode`
    pub fn new(mode: InteractionMode, classifier: GestureClassifier, touch_delay: Duration) -> Self {
        Self {
            mode,
            classifier,
            touch_delay,
            bindings: HashMap::new(),
        }
    }

    /// Mode used for new bindings
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Change the mode used for new bindings. Existing bindings keep their path
    /// until they are bound again.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// Attach `action` to `element` on the current mode's path.
    ///
    /// Returns `true` if an earlier binding for the element was replaced.
    pub fn bind(&mut self, element: ElementId, action: A) -> bool {
        let path = ActivationPath::from(self.mode);
        trace!("Binding {} on {:?} path", element, path);
        self.bindings
            .insert(element, Binding { path, action })
            .is_some()
    }

    /// Detach an element. Returns whether it was bound.
    pub fn unbind(&mut self, element: ElementId) -> bool {
        self.bindings.remove(&element).is_some()
    }

    /// Detach every element
    pub fn unbind_all(&mut self) {
        self.bindings.clear();
    }

    /// Whether `element` has a binding
    pub fn is_bound(&self, element: ElementId) -> bool {
        self.bindings.contains_key(&element)
    }

    /// Path attached to `element`
    pub fn path_of(&self, element: ElementId) -> Option<ActivationPath> {
        self.bindings.get(&element).map(|b| b.path)
    }

    /// Number of bound elements
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// No element is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn touch_binding(&self, element: ElementId) -> Option<&Binding<A>> {
        self.bindings
            .get(&element)
            .filter(|b| b.path == ActivationPath::Touch)
    }

    /// Finger down on `target`. Returns whether a session was opened.
    pub fn touch_start(
        &self,
        ctx: &mut InteractionContext,
        surface: &mut dyn Surface,
        target: ElementId,
        point: TouchPoint,
    ) -> bool {
        if self.touch_binding(target).is_none() {
            return false;
        }
        let session = self.classifier.on_touch_start(target, point);
        if let Some(previous) = ctx.replace_session(session) {
            debug!("Touch on {} replaced live session on {}", target, previous.target);
        }
        ctx.press(surface, target);
        true
    }

    /// Finger moved during a session started on `target`
    pub fn touch_move(&self, ctx: &mut InteractionContext, target: ElementId, point: TouchPoint) {
        if ctx.pressed().is_none() {
            return;
        }
        let Some(session) = ctx.session().copied() else {
            return;
        };
        if session.target != target {
            return;
        }
        let updated = self.classifier.on_touch_move(session, point);
        if updated.moved && !session.moved {
            debug!("Touch on {} moved past threshold, activation rejected", target);
        }
        ctx.replace_session(updated);
    }

    /// Finger lifted from `target`
    pub fn touch_end(
        &self,
        ctx: &mut InteractionContext,
        surface: &mut dyn Surface,
        target: ElementId,
    ) -> TouchEndOutcome<A> {
        let Some(binding) = self.touch_binding(target) else {
            return TouchEndOutcome::Ignored;
        };

        let pressed_here = ctx.pressed() == Some(target);
        let outcome = match ctx.take_session() {
            Some(session) if session.target == target && pressed_here => {
                if !self.classifier.on_touch_end(session).is_tap {
                    TouchEndOutcome::Rejected
                } else if ctx.try_enter() {
                    debug!("Tap on {} confirmed", target);
                    TouchEndOutcome::Confirmed {
                        action: binding.action.clone(),
                        delay: self.touch_delay,
                    }
                } else {
                    debug!("Tap on {} suppressed by activation gate", target);
                    TouchEndOutcome::Suppressed
                }
            }
            _ => TouchEndOutcome::Ignored,
        };

        surface.remove_class(target, ctx.pressed_class());
        ctx.clear_pressed(surface);
        outcome
    }

    /// Touch sequence cancelled by the platform: no activation, no pressed style
    pub fn touch_cancel(&self, ctx: &mut InteractionContext, surface: &mut dyn Surface) {
        if ctx.take_session().is_some() {
            debug!("Touch session cancelled");
        }
        ctx.clear_pressed(surface);
    }

    /// Document-level touch end: clears anything an element-level handler missed
    pub fn document_touch_end(&self, ctx: &mut InteractionContext, surface: &mut dyn Surface) {
        if let Some(element) = ctx.pressed() {
            debug!("Clearing stale pressed state on {}", element);
        }
        ctx.take_session();
        ctx.clear_pressed(surface);
    }

    /// Click on `target`
    ///
    /// On a touch-bound element the click is the browser's synthetic click after
    /// a tap and is suppressed. On a pointer-bound element it goes through the
    /// gate; a click arriving while the gate is locked also resets the shared
    /// interaction state.
    pub fn click(
        &self,
        ctx: &mut InteractionContext,
        surface: &mut dyn Surface,
        target: ElementId,
    ) -> ClickOutcome<A> {
        let Some(binding) = self.bindings.get(&target) else {
            return ClickOutcome::pass();
        };

        if binding.path == ActivationPath::Touch {
            // Cancels link navigation on cards; a no-op on tags
            return ClickOutcome {
                action: None,
                event: EventOutcome {
                    prevent_default: true,
                    stop_propagation: false,
                },
            };
        }

        if ctx.gate().is_locked() {
            debug!("Click on {} while an activation is in flight", target);
            ctx.reset(surface);
            return ClickOutcome {
                action: None,
                event: EventOutcome::SUPPRESS,
            };
        }

        if !ctx.try_enter() {
            debug!("Duplicate click on {} suppressed", target);
            return ClickOutcome {
                action: None,
                event: EventOutcome::SUPPRESS,
            };
        }

        ClickOutcome {
            action: Some(binding.action.clone()),
            event: EventOutcome::PASS,
        }
    }
}
