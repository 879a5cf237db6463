//! Interaction mode detection
//!
//! The mode follows the platform's coarse-pointer capability, which can toggle
//! while the page is open (a mouse is plugged into a tablet, for example).
//! Listeners subscribe to an [`Observable`] instead of the platform's native
//! change event.

use crate::platform::PointerCapability;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use tracing::info;

/// Which event set drives activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Touch-start/move/end with tap confirmation
    Touch,
    /// Direct click with hover styling
    Pointer,
}

impl InteractionMode {
    /// Mode implied by a coarse-pointer capability value
    pub fn from_coarse(coarse: bool) -> Self {
        if coarse { Self::Touch } else { Self::Pointer }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Touch => f.write_str("touch"),
            Self::Pointer => f.write_str("pointer"),
        }
    }
}

/// Handle returned by [`Observable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A value whose changes are pushed to subscribers
pub struct Observable<T> {
    value: T,
    listeners: SmallVec<[(SubscriptionId, Listener<T>); 2]>,
    next_id: u64,
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: PartialEq> Observable<T> {
    /// Observable holding `value` with no subscribers
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Call `listener` on every future change
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop notifying a subscriber. Returns `false` for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Store `value`, notifying subscribers if it differs from the current one.
    ///
    /// Returns whether the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
        true
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Tracks the active [`InteractionMode`]
#[derive(Debug)]
pub struct DeviceModeResolver {
    mode: Observable<InteractionMode>,
}

impl DeviceModeResolver {
    /// Resolve the startup mode from the platform capability
    pub fn new(capability: &dyn PointerCapability) -> Self {
        let mode = InteractionMode::from_coarse(capability.is_coarse());
        info!("Initial interaction mode: {}", mode);
        Self {
            mode: Observable::new(mode),
        }
    }

    /// Active mode
    pub fn current(&self) -> InteractionMode {
        *self.mode.get()
    }

    /// Call `callback` whenever the mode toggles
    pub fn on_change(&mut self, callback: impl FnMut(&InteractionMode) + 'static) -> SubscriptionId {
        self.mode.subscribe(callback)
    }

    /// Drop a subscription made with [`Self::on_change`]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.mode.unsubscribe(id)
    }

    /// Feed a capability change notification. Returns whether the mode changed.
    pub fn update(&mut self, coarse: bool) -> bool {
        let mode = InteractionMode::from_coarse(coarse);
        let changed = self.mode.set(mode);
        if changed {
            info!("Interaction mode changed to {}", mode);
        }
        changed
    }
}
