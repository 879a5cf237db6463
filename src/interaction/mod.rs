//! Interaction deduplication and device-adaptive event model
//!
//! # Overview
//!
//! Some browsers raise both native touch events and a synthetic `click` for the
//! same physical tap. This module guarantees exactly one logical activation per
//! gesture:
//!
//! - `GestureClassifier`: tap vs drag from a single touch sequence
//! - `ActivationGate`: process-wide lock plus a short cooldown that collapses
//!   duplicate triggers
//! - `DeviceModeResolver`: touch or pointer strategy, observable at runtime
//! - `InteractionBinder`: per-element registry that routes raw events through
//!   the classifier and the gate
//! - `InteractionContext`: the shared state all of the above mutate
//!
//! # Touch Activation
//!
//! ```text
//! Idle ─touch-start→ Armed ─move > threshold→ Rejected
//!                      └──touch-end, still→ Confirmed ─gate ok→ delay → activate → leave
//! ```
//!
//! Pointer activation is synchronous: `click → gate check → activate → leave`.

pub mod binder;
pub mod context;
pub mod gate;
pub mod gesture;
pub mod mode;

pub use binder::{ActivationPath, ClickOutcome, InteractionBinder, TouchEndOutcome};
pub use context::InteractionContext;
pub use gate::ActivationGate;
pub use gesture::{GestureClassifier, GestureSession, TouchClassification};
pub use mode::{DeviceModeResolver, InteractionMode, Observable, SubscriptionId};
