#![no_main]

use libfuzzer_sys::fuzz_target;
use sitedock::domain::services::RequestRouter;
use sitedock::EngineConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // First line is the host, the remainder is the request path.
        // Routing arbitrary requests must never panic or escape the root.
        let (host, path) = match input.split_once('\n') {
            Some((host, path)) => (host, path),
            None => (input, "/"),
        };

        let config = EngineConfig::default();
        let root = config.storage_root.clone();
        let router = RequestRouter::new(config);

        if let Ok(sitedock::domain::services::RouteOutcome::Matched(m)) =
            router.route(host, path)
        {
            assert!(m.dir.starts_with(&root));
        }
    }
});
