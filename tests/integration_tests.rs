//! Integration tests for the Junkyard gallery
//!
//! Drives a full controller over the in-memory surface with a manual clock:
//! tap and drag classification, duplicate suppression, forced resets, filtering
//! and exit transitions, mode switches, and data/config loading from disk.

use junkyard::{
    config::{AppConfig, ConfigManager},
    controller::{GalleryController, RenderPhase},
    data::Catalog,
    error::{JunkyardError, get_user_friendly_error},
    interaction::{ActivationPath, InteractionMode},
    platform::{
        ElementId, EventOutcome, ManualClock, MemorySurface, PlatformEvent, Surface, TouchPoint,
        classes,
    },
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const TAGS_JSON: &str = r#"{"tags": ["A", "B"]}"#;
const CARDS_JSON: &str = r#"[
    {"id": "one", "title": "One", "icon": "default", "link": "https://example.com/one", "tagId": "a"},
    {"id": "two", "title": "Two", "icon": "default", "link": "https://example.com/two", "tagId": "a"},
    {"id": "three", "title": "Three", "icon": "default", "link": "https://example.com/three", "tagId": "b"}
]"#;
const ICONS_JSON: &str = r#"{"default": "<svg/>"}"#;

const fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

struct Harness {
    clock: ManualClock,
    gallery: GalleryController<MemorySurface>,
}

impl Harness {
    fn new(coarse: bool) -> Self {
        let clock = ManualClock::new();
        clock.set(ms(1000));
        let catalog = Catalog::from_json(TAGS_JSON, CARDS_JSON, Some(ICONS_JSON)).unwrap();
        let mut gallery = GalleryController::new(
            &AppConfig::default(),
            catalog,
            MemorySurface::new(),
            Arc::new(clock.clone()),
            &coarse,
        );
        gallery.start();
        Self { clock, gallery }
    }

    /// Advance the clock and run whatever became due, then one animation frame
    fn advance(&mut self, delta: Duration) {
        self.clock.advance(delta);
        self.gallery.run_due_timers();
        self.gallery.run_animation_frame();
    }

    fn tag(&self, id: &str) -> ElementId {
        self.gallery.tag_element(id).unwrap()
    }

    fn card(&self, id: &str) -> ElementId {
        self.gallery.surface().find_card(id).unwrap()
    }

    fn touch_start(&mut self, target: ElementId, x: f64, y: f64) {
        self.gallery.handle_event(PlatformEvent::TouchStart {
            target,
            point: TouchPoint::new(x, y),
        });
    }

    fn touch_move(&mut self, target: ElementId, x: f64, y: f64) {
        self.gallery.handle_event(PlatformEvent::TouchMove {
            target,
            point: TouchPoint::new(x, y),
        });
    }

    fn touch_end(&mut self, target: ElementId) {
        self.gallery
            .handle_event(PlatformEvent::TouchEnd { target: Some(target) });
    }

    fn click(&mut self, target: ElementId) -> EventOutcome {
        self.gallery.handle_event(PlatformEvent::Click { target })
    }

    fn rendered(&self) -> Vec<String> {
        self.gallery.surface().card_keys()
    }

    /// Let every pending exit wait and enter frame finish
    fn settle(&mut self) {
        while let Some(deadline) = self.gallery.next_deadline() {
            self.clock.set(deadline);
            self.gallery.run_due_timers();
            self.gallery.run_animation_frame();
        }
        self.gallery.run_animation_frame();
    }
}

/// A stationary touch sequence activates exactly once, after the confirmation delay
#[test]
fn test_tap_fires_once_after_delay() {
    let mut h = Harness::new(true);
    let b = h.tag("b");

    h.touch_start(b, 10.0, 10.0);
    assert!(h.gallery.surface().has_class(b, "touch"));
    h.advance(ms(40));
    h.touch_end(b);
    assert!(!h.gallery.surface().has_class(b, "touch"));

    // Synthetic click after the tap must not activate a second time
    let outcome = h.click(b);
    assert!(outcome.prevent_default);

    h.advance(ms(149));
    assert_eq!(h.gallery.filter().selected_tag_id, "all");
    assert!(h.gallery.context().gate().is_locked());

    h.advance(ms(1));
    assert_eq!(h.gallery.filter().selected_tag_id, "b");
    assert!(!h.gallery.context().gate().is_locked());

    h.settle();
    assert_eq!(h.rendered(), vec!["three"]);
}

/// Any movement past the threshold cancels the activation
#[test]
fn test_drag_fires_zero() {
    let mut h = Harness::new(true);
    let a = h.tag("a");

    h.touch_start(a, 10.0, 10.0);
    h.touch_move(a, 21.0, 10.0);
    // Returning to the origin does not make it a tap again
    h.touch_move(a, 10.0, 10.0);
    h.touch_end(a);

    assert!(h.gallery.is_idle());
    assert!(!h.gallery.context().gate().is_locked());
    assert!(!h.gallery.surface().has_class(a, "touch"));
    h.settle();
    assert_eq!(h.gallery.filter().selected_tag_id, "all");
}

/// Movement of exactly the threshold still counts as a tap
#[test]
fn test_movement_at_threshold_is_tap() {
    let mut h = Harness::new(true);
    let a = h.tag("a");

    h.touch_start(a, 0.0, 0.0);
    h.touch_move(a, 10.0, -10.0);
    h.touch_end(a);

    h.settle();
    assert_eq!(h.gallery.filter().selected_tag_id, "a");
    assert_eq!(h.rendered(), vec!["one", "two"]);
}

/// Two clicks inside the cooldown produce one activation
#[test]
fn test_duplicate_clicks_collapse() {
    let mut h = Harness::new(false);
    let one = h.card("one");

    // The controller navigates, so the native link is always cancelled
    let navigated = EventOutcome {
        prevent_default: true,
        stop_propagation: false,
    };
    assert_eq!(h.click(one), navigated);
    h.clock.advance(ms(10));
    assert_eq!(h.click(one), EventOutcome::SUPPRESS);
    assert_eq!(
        h.gallery.surface().opened_links(),
        ["https://example.com/one".to_string()]
    );

    h.clock.advance(ms(40));
    assert_eq!(h.click(one), navigated);
    assert_eq!(h.gallery.surface().opened_links().len(), 2);
}

/// Taps on two elements within the cooldown: only the first one fires
#[test]
fn test_taps_within_cooldown_collapse() {
    let mut h = Harness::new(true);
    let (a, b) = (h.tag("a"), h.tag("b"));

    h.touch_start(a, 0.0, 0.0);
    h.touch_end(a);
    h.touch_start(b, 0.0, 0.0);
    h.touch_end(b);

    h.settle();
    assert_eq!(h.gallery.filter().selected_tag_id, "a");
}

/// Losing focus mid-gesture unlocks the gate and clears the pressed style
#[test]
fn test_blur_resets_interaction_state() {
    let mut h = Harness::new(true);
    let (a, b) = (h.tag("a"), h.tag("b"));

    h.touch_start(a, 0.0, 0.0);
    h.gallery.handle_event(PlatformEvent::WindowBlur);
    assert!(!h.gallery.surface().has_class(a, "touch"));
    assert!(h.gallery.context().pressed().is_none());

    // Confirmed tap holds the gate until the activation runs
    h.touch_start(b, 0.0, 0.0);
    h.touch_end(b);
    assert!(h.gallery.context().gate().is_locked());

    h.gallery.handle_event(PlatformEvent::WindowFocus);
    assert!(!h.gallery.context().gate().is_locked());
    assert!(h.gallery.context().gate().last_activation().is_none());

    h.gallery
        .handle_event(PlatformEvent::VisibilityChanged { visible: true });
    assert!(!h.gallery.context().gate().is_locked());
}

/// Orphaned touch end clears a pressed element whose own end never arrived
#[test]
fn test_document_touch_end_clears_pressed() {
    let mut h = Harness::new(true);
    let a = h.tag("a");

    h.touch_start(a, 0.0, 0.0);
    h.gallery
        .handle_event(PlatformEvent::TouchEnd { target: None });

    assert!(!h.gallery.surface().has_class(a, "touch"));
    assert!(h.gallery.is_idle());
}

/// Each tag shows exactly its cards, 'all' shows everything
#[test]
fn test_filter_subsets() {
    let mut h = Harness::new(false);
    assert_eq!(h.rendered(), vec!["one", "two", "three"]);

    for (tag, expected) in [
        ("a", vec!["one", "two"]),
        ("b", vec!["three"]),
        ("all", vec!["one", "two", "three"]),
    ] {
        h.gallery.select_tag(tag).unwrap();
        h.settle();
        assert_eq!(h.rendered(), expected, "cards for '{tag}'");
        assert_eq!(h.gallery.visible_cards().len(), expected.len());
    }
}

/// New cards are inserted only after the exit duration, and become visible on a frame
#[test]
fn test_exit_wait_ordering() {
    let mut h = Harness::new(false);
    let old: Vec<_> = h.gallery.displayed().to_vec();

    h.gallery.select_tag("b").unwrap();
    assert_eq!(h.gallery.phase(), RenderPhase::Exiting);
    for element in &old {
        assert!(h.gallery.surface().has_class(*element, classes::HIDING));
        assert!(!h.gallery.surface().has_class(*element, classes::VISIBLE));
    }

    h.clock.advance(ms(249));
    assert_eq!(h.gallery.run_due_timers(), 0);
    assert_eq!(h.rendered(), vec!["one", "two", "three"]);

    h.clock.advance(ms(1));
    assert_eq!(h.gallery.run_due_timers(), 1);
    assert_eq!(h.gallery.phase(), RenderPhase::Displaying);
    assert_eq!(h.rendered(), vec!["three"]);
    let three = h.card("three");
    assert!(!h.gallery.surface().has_class(three, classes::VISIBLE));

    assert_eq!(h.gallery.run_animation_frame(), 1);
    assert!(h.gallery.surface().has_class(three, classes::VISIBLE));
    assert!(h.gallery.is_idle());
}

/// Re-selecting the active tag still runs the transition
#[test]
fn test_reselect_reruns_transition() {
    let mut h = Harness::new(false);
    h.gallery.select_tag("all").unwrap();
    assert_eq!(h.gallery.phase(), RenderPhase::Exiting);
    h.settle();
    assert_eq!(h.rendered(), vec!["one", "two", "three"]);
}

/// Capability flip rebuilds once on the new path and renders without exit
#[test]
fn test_mode_switch_rebinds_once() {
    let mut h = Harness::new(false);
    let notified = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notified);
    h.gallery
        .on_mode_change(move |mode| sink.lock().push(*mode));

    h.gallery.select_tag("b").unwrap();
    h.settle();
    let old_b = h.tag("b");
    let old_three = h.card("three");

    h.gallery
        .handle_event(PlatformEvent::PointerCapabilityChanged { coarse: true });

    assert_eq!(h.gallery.mode(), InteractionMode::Touch);
    assert_eq!(*notified.lock(), vec![InteractionMode::Touch]);
    assert_eq!(h.gallery.filter().selected_tag_id, "all");
    assert!(!h.gallery.filter().is_first_render);

    // "All" plus two data tags, three cards, each bound exactly once
    assert_eq!(h.gallery.binder().len(), 6);
    assert_eq!(h.gallery.surface().tags().count(), 3);
    assert_ne!(h.tag("b"), old_b);
    for element in h.gallery.displayed() {
        assert_eq!(
            h.gallery.binder().path_of(*element),
            Some(ActivationPath::Touch)
        );
        assert!(h.gallery.surface().has_class(*element, classes::VISIBLE));
    }
    assert_eq!(h.gallery.phase(), RenderPhase::Displaying);

    // Same capability again is not a change
    let b = h.tag("b");
    h.gallery
        .handle_event(PlatformEvent::PointerCapabilityChanged { coarse: true });
    assert_eq!(h.tag("b"), b);
    assert_eq!(notified.lock().len(), 1);

    // Elements from before the switch no longer activate anything
    for stale in [old_b, old_three] {
        h.touch_start(stale, 0.0, 0.0);
        h.touch_end(stale);
        assert!(h.gallery.is_idle());
        assert!(!h.gallery.context().gate().is_locked());
    }
    h.settle();
    assert_eq!(h.gallery.filter().selected_tag_id, "all");
    assert!(h.gallery.surface().opened_links().is_empty());

    // Their replacements activate exactly once
    let three = h.card("three");
    h.touch_start(three, 0.0, 0.0);
    h.touch_end(three);
    h.settle();
    assert_eq!(
        h.gallery.surface().opened_links(),
        ["https://example.com/three".to_string()]
    );
}

/// An exit wait started before a rebuild does not swap cards afterwards
#[test]
fn test_mode_switch_drops_stale_exit() {
    let mut h = Harness::new(false);
    h.gallery.select_tag("b").unwrap();
    h.gallery
        .handle_event(PlatformEvent::PointerCapabilityChanged { coarse: true });

    h.settle();
    assert_eq!(h.gallery.filter().selected_tag_id, "all");
    assert_eq!(h.rendered(), vec!["one", "two", "three"]);
}

/// Touch activation of a card navigates after a second confirmation delay
#[test]
fn test_card_tap_opens_link_deferred() {
    let mut h = Harness::new(true);
    let two = h.card("two");

    h.touch_start(two, 5.0, 5.0);
    h.touch_end(two);

    h.advance(ms(150));
    assert!(h.gallery.surface().opened_links().is_empty());
    h.advance(ms(149));
    assert!(h.gallery.surface().opened_links().is_empty());
    h.advance(ms(1));
    assert_eq!(
        h.gallery.surface().opened_links(),
        ["https://example.com/two".to_string()]
    );
}

/// Clicks on unbound elements are left alone
#[test]
fn test_unbound_click_passes() {
    let mut h = Harness::new(false);
    assert_eq!(h.click(ElementId(9999)), EventOutcome::PASS);
    assert!(h.gallery.surface().opened_links().is_empty());
}

/// Catalog and config round-trip through the filesystem
#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tags.json"), TAGS_JSON).unwrap();
    std::fs::write(dir.path().join("cards.json"), CARDS_JSON).unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.tags().len(), 2);
    assert_eq!(catalog.cards_for("a").len(), 2);
    assert!(catalog.icon("default").is_none());

    let mut config = AppConfig::default();
    config.interaction.cooldown_ms = 80;
    config.gallery.all_tag_label = "Everything".to_string();
    let config_path = dir.path().join("nested").join("config.json");
    ConfigManager::save_to(&config, &config_path).unwrap();
    let loaded = ConfigManager::load_from(&config_path).unwrap();
    assert_eq!(loaded, config);
}

/// Missing data files surface as a data error with a readable message
#[test]
fn test_missing_catalog_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, JunkyardError::DataError(_)));
    assert!(!get_user_friendly_error(&err).is_empty());
}

/// Custom timings from the config drive the controller
#[test]
fn test_configured_timings() {
    let clock = ManualClock::new();
    let mut config = AppConfig::default();
    config.gallery.animation_duration_ms = 100;
    config.gallery.all_tag_label = "Everything".to_string();
    let catalog = Catalog::from_json(TAGS_JSON, CARDS_JSON, None).unwrap();
    let mut gallery = GalleryController::new(
        &config,
        catalog,
        MemorySurface::new(),
        Arc::new(clock.clone()),
        &false,
    );
    gallery.start();

    gallery.select_tag("a").unwrap();
    clock.advance(ms(100));
    assert_eq!(gallery.run_due_timers(), 1);
    assert_eq!(gallery.surface().card_keys(), vec!["one", "two"]);

    let all = gallery.tag_element("all").unwrap();
    assert!(gallery.surface().element(all).is_some());
    assert!(!gallery.surface().has_class(all, classes::SELECTED));
}
