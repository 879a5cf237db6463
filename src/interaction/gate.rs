//! Activation gate: mutual exclusion plus duplicate-suppression cooldown
//!
//! Coarse input on some browsers raises both a synthetic `click` and the native
//! touch events for one physical tap. The cooldown collapses these into one
//! logical activation; the lock prevents an activation from starting while
//! another one is still in flight.

use std::time::Duration;

/// Default window in which a second activation counts as a duplicate
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(50);

/// Process-wide activation guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationGate {
    cooldown: Duration,
    last_activation: Option<Duration>,
    locked: bool,
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl ActivationGate {
    /// Unlocked gate with no activation history
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_activation: None,
            locked: false,
        }
    }

    /// Try to start an activation at `now`.
    ///
    /// Fails without touching state when the gate is locked or the previous
    /// activation happened less than one cooldown ago.
    pub fn try_enter(&mut self, now: Duration) -> bool {
        if self.locked || self.is_duplicate(now) {
            return false;
        }
        self.locked = true;
        self.last_activation = Some(now);
        true
    }

    /// Finish the in-flight activation
    pub fn leave(&mut self) {
        self.locked = false;
    }

    /// Unlock and forget the last activation
    pub fn force_reset(&mut self) {
        self.locked = false;
        self.last_activation = None;
    }

    /// Whether `now` falls inside the cooldown of the last activation
    pub fn is_duplicate(&self, now: Duration) -> bool {
        self.last_activation
            .is_some_and(|last| now.saturating_sub(last) < self.cooldown)
    }

    /// An activation is in flight
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Time of the last successful entry, if any since the last reset
    pub fn last_activation(&self) -> Option<Duration> {
        self.last_activation
    }

    /// Configured cooldown
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}
