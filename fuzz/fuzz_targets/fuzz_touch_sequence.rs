#![no_main]

use junkyard::config::AppConfig;
use junkyard::controller::GalleryController;
use junkyard::data::Catalog;
use junkyard::platform::{ElementId, ManualClock, MemorySurface, PlatformEvent, TouchPoint};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use std::time::Duration;

const TAGS: &str = r#"{"tags": ["A", "B", "C"]}"#;
const CARDS: &str = r#"[
    {"id": "1", "title": "1", "link": "https://example.com/1", "tagId": "a"},
    {"id": "2", "title": "2", "link": "https://example.com/2", "tagId": "b"},
    {"id": "3", "title": "3", "link": "https://example.com/3", "tagId": "c"}
]"#;

fuzz_target!(|data: &[u8]| {
    let Ok(catalog) = Catalog::from_json(TAGS, CARDS, None) else {
        return;
    };
    let clock = ManualClock::new();
    let mut gallery = GalleryController::new(
        &AppConfig::default(),
        catalog,
        MemorySurface::new(),
        Arc::new(clock.clone()),
        &true,
    );
    gallery.start();

    // Each 3-byte chunk: event kind, target element, elapsed time / coordinate
    for chunk in data.chunks_exact(3) {
        let target = ElementId(u64::from(chunk[1] % 16));
        let point = TouchPoint::new(f64::from(chunk[2]), 0.0);
        let event = match chunk[0] % 9 {
            0 => PlatformEvent::TouchStart { target, point },
            1 => PlatformEvent::TouchMove { target, point },
            2 => PlatformEvent::TouchEnd { target: Some(target) },
            3 => PlatformEvent::TouchEnd { target: None },
            4 => PlatformEvent::TouchCancel { target: None },
            5 => PlatformEvent::Click { target },
            6 => PlatformEvent::WindowBlur,
            7 => PlatformEvent::PointerCapabilityChanged { coarse: chunk[2] % 2 == 0 },
            _ => {
                clock.advance(Duration::from_millis(u64::from(chunk[2]) * 4));
                gallery.run_due_timers();
                gallery.run_animation_frame();
                continue;
            }
        };
        gallery.handle_event(event);
    }

    while let Some(deadline) = gallery.next_deadline() {
        clock.set(deadline);
        gallery.run_due_timers();
        gallery.run_animation_frame();
    }
    gallery.run_animation_frame();

    // Once everything settled the grid shows exactly the selected subset
    assert!(gallery.is_idle());
    assert_eq!(gallery.displayed().len(), gallery.visible_cards().len());
    assert!(!gallery.context().gate().is_locked());
});
