//! Property tests for path containment.

use std::path::{Component, Path, PathBuf};

use proptest::prelude::*;

use sitedock::domain::entities::Descriptor;
use sitedock::domain::services::{PathResolver, RequestRouter, RouteOutcome};
use sitedock::domain::value_objects::SafePath;
use sitedock::EngineConfig;

const ROOT: &str = "/srv/deployed";

fn config() -> EngineConfig {
    EngineConfig {
        storage_root: PathBuf::from(ROOT),
        ..EngineConfig::default()
    }
}

fn contains_no_traversal(path: &Path) -> bool {
    path.components()
        .all(|c| !matches!(c, Component::ParentDir))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Path validation never panics, and an accepted path joined
    /// under the root always stays under the root.
    #[test]
    fn property_safe_path_stays_under_root(
        s in "(?s).{0,128}"
    ) {
        if let Ok(safe) = SafePath::new(&s) {
            let joined = Path::new(ROOT).join(&safe);
            prop_assert!(joined.starts_with(ROOT));
            prop_assert!(contains_no_traversal(safe.as_path()));
        }
    }

    /// PROPERTY: Resolving an arbitrary descriptor never panics, and a
    /// successful resolution always lands inside the storage root.
    #[test]
    fn property_resolver_stays_under_root(
        tenant in "(?s).{0,32}",
        site in "(?s).{0,32}",
        domain in proptest::option::of("(?s).{0,48}"),
        subdomain in proptest::option::of("(?s).{0,32}"),
    ) {
        let mut descriptor = Descriptor::new(tenant.as_str(), site);
        descriptor.domain = domain;
        descriptor.subdomain = subdomain;

        let resolver = PathResolver::new(config());
        if let Ok(resolution) = resolver.resolve(&descriptor) {
            prop_assert!(resolution.storage_path.starts_with(ROOT));
            prop_assert!(SafePath::is_within(&resolution.storage_path, Path::new(ROOT)));
        }
    }

    /// PROPERTY: Routing arbitrary requests never panics, and any matched
    /// candidate directory and rest stay inside the storage root.
    #[test]
    fn property_router_stays_under_root(
        host in "(?s).{0,64}",
        path in "(?s).{0,128}",
    ) {
        let router = RequestRouter::new(config());
        if let Ok(RouteOutcome::Matched(m)) = router.route(&host, &path) {
            prop_assert!(m.dir.starts_with(ROOT));
            let candidate = match m.rest {
                Some(rest) => m.dir.join(rest),
                None => m.dir.join("index.html"),
            };
            prop_assert!(SafePath::is_within(&candidate, Path::new(ROOT)));
        }
    }

    /// PROPERTY: Well-formed subdomain requests always route to the label's
    /// directory, whatever the trailing path looks like.
    #[test]
    fn property_subdomain_request_routes_to_label_dir(
        label in "[a-z0-9][a-z0-9-]{0,20}",
        rest in "[A-Za-z0-9._/-]{0,64}",
    ) {
        let router = RequestRouter::new(config());
        let request = format!("/subdomain/{}/{}", label, rest);
        match router.route("anything.example", &request) {
            Ok(RouteOutcome::Matched(m)) => {
                prop_assert_eq!(
                    m.dir,
                    Path::new(ROOT).join("subdomains").join(&label)
                );
            }
            Ok(RouteOutcome::NotOwned) => prop_assert!(false, "owned shape fell through"),
            // Errors only happen when the trailing path itself is invalid
            Err(_) => prop_assert!(SafePath::new(rest.trim_matches('/')).is_err()),
        }
    }
}
