#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(host) = std::str::from_utf8(data) {
        // Host header parsing must never panic
        let suffixes = vec!["ntando.store".to_string(), "ntando.cloud".to_string()];
        let _ = sitedock::domain::value_objects::PlatformHost::parse(host, &suffixes);
        let _ = sitedock::domain::value_objects::is_plausible_domain(host);
    }
});
