#![no_main]

use junkyard::data::Catalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First line is tags.json, the rest cards.json
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (tags, cards) = s.split_once('\n').unwrap_or((s, "[]"));
    if let Ok(catalog) = Catalog::from_json(tags, cards, None) {
        let total: usize = catalog
            .tags()
            .iter()
            .map(|t| catalog.cards_for(&t.id).len())
            .sum();
        assert!(total <= catalog.cards().len());
        assert_eq!(catalog.cards_for("all").len(), catalog.cards().len());
    }
});
