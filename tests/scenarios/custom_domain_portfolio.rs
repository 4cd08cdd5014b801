//! Scenario: tenant brings an external domain for a portfolio site.
//!
//! Journey:
//! 1. Tenant 7 deploys `portfolio` with `--domain example.com`
//! 2. Storage lands under the tenant subtree, never under `subdomains/`
//! 3. The site is reachable through the tenant path while DNS for the
//!    custom domain is handled upstream
//! 4. A second tenant deploying the same site name gets its own directory

use crate::common::TestEnv;
use sitedock::domain::entities::{Descriptor, TenantId};
use sitedock::domain::ports::DeploymentStore;
use sitedock::{AddressingMode, ServeOutcome};

#[test]
fn scenario_custom_domain_portfolio() {
    let env = TestEnv::new();

    // Step 1 + 2
    let descriptor = Descriptor::new("7", "portfolio").with_domain("example.com");
    let outcome = env
        .deploy_engine()
        .execute(&descriptor, &[env.stage("index.html", "<h1>work</h1>")])
        .unwrap();

    assert_eq!(outcome.mode, AddressingMode::CustomDomain);
    assert_eq!(outcome.external_url, "https://example.com");
    assert_eq!(
        outcome.storage_path,
        env.deployed_path("tenants/7/portfolio")
    );
    assert!(!env.deployed_path("subdomains").exists());

    // Step 3: the engine does not own bare custom-domain requests; the
    // fronting proxy rewrites them onto the tenant path.
    let serve = env.serve_engine();
    assert_eq!(
        serve.resolve("example.com", "/").unwrap(),
        ServeOutcome::NotOwned
    );
    match serve.resolve("example.com", "/tenants/7/portfolio").unwrap() {
        ServeOutcome::File { path, .. } => {
            assert_eq!(path, env.deployed_path("tenants/7/portfolio/index.html"))
        }
        other => panic!("expected index, got {:?}", other),
    }

    // Step 4: same site name under another tenant is fully isolated
    let other = Descriptor::new("8", "portfolio");
    env.deploy_engine()
        .execute(&other, &[env.stage("index.html", "<h1>other</h1>")])
        .unwrap();

    assert_eq!(env.read_deployed("tenants/7/portfolio/index.html"), "<h1>work</h1>");
    assert_eq!(env.read_deployed("tenants/8/portfolio/index.html"), "<h1>other</h1>");

    let mine = env.store().list_by_tenant(&TenantId::new("7")).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].domain.as_deref(), Some("example.com"));
}
