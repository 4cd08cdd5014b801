#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        // Path sanitization must never panic, whatever the client sends
        let _ = sitedock::domain::value_objects::SafePath::new(raw);
        let _ = sitedock::domain::value_objects::SafePath::segment(raw);
    }
});
