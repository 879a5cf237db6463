#![no_main]

use junkyard::config::AppConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mut config) = serde_json::from_str::<AppConfig>(s) {
            // Whatever parsed must come out of sanitize with usable values
            config.sanitize();
            assert!(config.interaction.move_threshold_px.is_finite());
            assert!(config.interaction.move_threshold_px >= 0.0);
        }
    }
});
