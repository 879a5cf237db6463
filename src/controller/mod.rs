//! Gallery controller module
//!
//! This module owns the filter state and sequences the card transitions.
//!
//! # Overview
//!
//! The gallery controller is the caller of every binding:
//! - **Receives platform events** from the host and routes them to the binder
//! - **Runs activations** for tag selection and card navigation
//! - **Sequences transitions** between card sets with exit and enter phases
//! - **Rebuilds the interface** when the interaction mode toggles at runtime
//!
//! # Transition Sequence
//!
//! ```text
//! Displaying(A) ──select──→ Exiting(A) ──250ms──→ Displaying(B) ──next frame──→ visible
//! ```
//!
//! On the first render after a full rebuild the exit phase and its wait are
//! skipped and the new cards are marked visible immediately.
//!
//! # Scheduling
//!
//! The host drives time: it forwards events through `handle_event`, calls
//! `run_due_timers` whenever the clock passes `next_deadline`, and calls
//! `run_animation_frame` once per painted frame.

pub mod gallery_controller;

pub use gallery_controller::{FilterState, GalleryAction, GalleryController, RenderPhase};
