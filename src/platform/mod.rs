//! Platform seams
//!
//! Everything the interaction core needs from its host: a monotonic clock, a
//! queue of scheduled continuations, an element surface with class toggling,
//! the coarse-pointer query and the raw events themselves.
//!
//! # Event Flow
//!
//! ```text
//! host ── PlatformEvent ──→ GalleryController ──→ InteractionBinder
//!   │                             │                      ↓
//!   │                             │               ActivationGate
//!   └── run_due_timers / ────→ TaskQueue ←── delayed activations,
//!       run_animation_frame                   exit waits, mark visible
//! ```

pub mod clock;
pub mod events;
pub mod memory;
pub mod scheduler;
pub mod surface;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use events::{EventOutcome, PlatformEvent, TouchPoint};
pub use memory::{MemoryElement, MemorySurface};
pub use scheduler::TaskQueue;
pub use surface::{ElementId, ElementKind, Surface, classes};

/// Coarse-pointer media capability (`(pointer: coarse)` on the web)
pub trait PointerCapability {
    /// Whether the primary input is touch-like
    fn is_coarse(&self) -> bool;
}

impl PointerCapability for bool {
    fn is_coarse(&self) -> bool {
        *self
    }
}
