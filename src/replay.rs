//! Headless replay of recorded platform events
//!
//! A trace is a list of timed steps. Targets are addressed by tag or card id
//! because element ids only exist once the gallery is rendered.
//!
//! ```json
//! {"steps": [
//!   {"at_ms": 0,   "event": {"type": "touch_start", "target": {"tag": "dev"}, "point": {"x": 4, "y": 4}}},
//!   {"at_ms": 80,  "event": {"type": "touch_end", "target": {"tag": "dev"}}},
//!   {"at_ms": 90,  "event": {"type": "click", "target": {"tag": "dev"}}}
//! ]}
//! ```

use anyhow::{Context, Result};
use junkyard::config::AppConfig;
use junkyard::controller::GalleryController;
use junkyard::data::{Card, Catalog, Tag};
use junkyard::platform::{
    Clock, ElementId, ManualClock, MemorySurface, PlatformEvent, Surface, TouchPoint,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Element reference inside a trace
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Tag(String),
    Card(String),
}

/// Trace counterpart of [`PlatformEvent`]
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    TouchStart { target: Target, point: TouchPoint },
    TouchMove { target: Target, point: TouchPoint },
    TouchEnd { target: Option<Target> },
    TouchCancel { target: Option<Target> },
    Click { target: Target },
    PointerEnter { target: Target },
    PointerLeave { target: Target },
    VisibilityChanged { visible: bool },
    WindowBlur,
    WindowFocus,
    PointerCapabilityChanged { coarse: bool },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraceStep {
    pub at_ms: u64,
    pub event: TraceEvent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Malformed trace {}", path.display()))
    }
}

/// Memory surface that can also hand links to the desktop
#[derive(Debug)]
pub struct ReplaySurface {
    inner: MemorySurface,
    open_links: bool,
}

impl ReplaySurface {
    pub fn new(open_links: bool) -> Self {
        Self {
            inner: MemorySurface::new(),
            open_links,
        }
    }
}

impl Surface for ReplaySurface {
    fn clear_tags(&mut self) {
        self.inner.clear_tags();
    }

    fn insert_tag(&mut self, tag: &Tag) -> ElementId {
        self.inner.insert_tag(tag)
    }

    fn clear_cards(&mut self) {
        self.inner.clear_cards();
    }

    fn insert_card(&mut self, card: &Card, icon: Option<&str>) -> ElementId {
        self.inner.insert_card(card, icon)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.inner.add_class(element, class);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        self.inner.remove_class(element, class);
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.inner.has_class(element, class)
    }

    fn open_link(&mut self, url: &str) {
        self.inner.open_link(url);
        if self.open_links {
            if let Err(e) = open::that(url) {
                warn!("Failed to open {}: {}", url, e);
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardState {
    pub id: String,
    pub classes: Vec<String>,
}

/// Final state printed after a replay
#[derive(Debug, Serialize)]
pub struct Summary {
    pub mode: String,
    pub selected_tag: String,
    pub cards: Vec<CardState>,
    pub opened_links: Vec<String>,
    pub suppressed_events: usize,
    pub skipped_steps: usize,
}

type Controller = GalleryController<ReplaySurface>;

fn resolve(controller: &Controller, target: &Target) -> Option<ElementId> {
    match target {
        Target::Tag(id) => controller.tag_element(id),
        Target::Card(id) => controller.surface().inner.find_card(id),
    }
}

fn to_platform(controller: &Controller, event: &TraceEvent) -> Option<PlatformEvent> {
    let event = match event {
        TraceEvent::TouchStart { target, point } => PlatformEvent::TouchStart {
            target: resolve(controller, target)?,
            point: *point,
        },
        TraceEvent::TouchMove { target, point } => PlatformEvent::TouchMove {
            target: resolve(controller, target)?,
            point: *point,
        },
        // A removed element still produces a document-level end
        TraceEvent::TouchEnd { target } => PlatformEvent::TouchEnd {
            target: target.as_ref().and_then(|t| resolve(controller, t)),
        },
        TraceEvent::TouchCancel { target } => PlatformEvent::TouchCancel {
            target: target.as_ref().and_then(|t| resolve(controller, t)),
        },
        TraceEvent::Click { target } => PlatformEvent::Click {
            target: resolve(controller, target)?,
        },
        TraceEvent::PointerEnter { target } => PlatformEvent::PointerEnter {
            target: resolve(controller, target)?,
        },
        TraceEvent::PointerLeave { target } => PlatformEvent::PointerLeave {
            target: resolve(controller, target)?,
        },
        TraceEvent::VisibilityChanged { visible } => {
            PlatformEvent::VisibilityChanged { visible: *visible }
        }
        TraceEvent::WindowBlur => PlatformEvent::WindowBlur,
        TraceEvent::WindowFocus => PlatformEvent::WindowFocus,
        TraceEvent::PointerCapabilityChanged { coarse } => {
            PlatformEvent::PointerCapabilityChanged { coarse: *coarse }
        }
    };
    Some(event)
}

/// Run timers due up to `until`, painting a frame after each batch
fn advance(controller: &mut Controller, clock: &ManualClock, until: Duration) {
    while let Some(deadline) = controller.next_deadline().filter(|d| *d <= until) {
        clock.set(deadline);
        controller.run_due_timers();
        controller.run_animation_frame();
    }
    clock.set(until);
    controller.run_animation_frame();
}

/// Replay `trace` against a fresh gallery and report where it ended up
pub fn run(
    config: &AppConfig,
    catalog: Catalog,
    trace: &Trace,
    coarse: bool,
    open_links: bool,
) -> Summary {
    let clock = ManualClock::new();
    let mut controller = GalleryController::new(
        config,
        catalog,
        ReplaySurface::new(open_links),
        Arc::new(clock.clone()),
        &coarse,
    );
    controller.start();

    let mut suppressed_events = 0;
    let mut skipped_steps = 0;
    for step in &trace.steps {
        advance(&mut controller, &clock, Duration::from_millis(step.at_ms));
        let Some(event) = to_platform(&controller, &step.event) else {
            warn!("Skipping step at {}ms: target not rendered", step.at_ms);
            skipped_steps += 1;
            continue;
        };
        if controller.handle_event(event).prevent_default {
            suppressed_events += 1;
        }
    }

    while let Some(deadline) = controller.next_deadline() {
        advance(&mut controller, &clock, deadline);
    }
    controller.run_animation_frame();
    info!("Replay finished at {:?}", clock.now());

    let surface = &controller.surface().inner;
    Summary {
        mode: controller.mode().to_string(),
        selected_tag: controller.filter().selected_tag_id.clone(),
        cards: surface
            .cards()
            .map(|c| CardState {
                id: c.key.clone(),
                classes: c.classes.iter().cloned().collect(),
            })
            .collect(),
        opened_links: surface.opened_links().to_vec(),
        suppressed_events,
        skipped_steps,
    }
}
