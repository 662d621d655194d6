#![no_main]
use chrono::Utc;
use epex_monitor::pricing::{TimeSlot, format_slot_table, normalize, resolve};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary response bodies must never panic the parse/normalize/resolve path
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(doc) = epex_monitor::entsoe::PublicationDocument::from_xml(text)
    {
        let slots = normalize(&doc);
        let _ = format_slot_table(&slots);
        let now = Utc::now();
        let _ = resolve(&slots, now, TimeSlot::fallback(now));
        if let Some(first) = slots.first() {
            let _ = resolve(&slots, first.start, TimeSlot::fallback(first.start));
        }
    }
});
