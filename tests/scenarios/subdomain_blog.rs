//! Scenario: tenant launches a blog on a simulated subdomain.
//!
//! Journey:
//! 1. Tenant 42 deploys `blog` with `--subdomain myblog`
//! 2. Visitors reach it via the simulation path and via the real host
//! 3. The tenant pushes an updated version to the same address
//! 4. The tenant removes the site and it stops resolving

use crate::common::TestEnv;
use sitedock::domain::entities::{Descriptor, TenantId};
use sitedock::domain::ports::DeploymentStore;
use sitedock::ServeOutcome;

#[test]
fn scenario_subdomain_blog_full_lifecycle() {
    let env = TestEnv::new();
    let descriptor = Descriptor::new("42", "blog").with_subdomain("myblog");

    // Step 1: first deploy
    let outcome = env
        .deploy_engine()
        .execute(
            &descriptor,
            &[
                env.stage("index.html", "<h1>my blog</h1>"),
                env.stage("style.css", "h1 { color: teal }"),
            ],
        )
        .unwrap();
    assert_eq!(
        outcome.external_url,
        "http://localhost:3000/subdomain/myblog"
    );
    let record = outcome.deployment.expect("record");
    assert_eq!(record.domain.as_deref(), Some("myblog.ntando.store"));

    // Step 2: both addressing surfaces resolve to the same files
    let serve = env.serve_engine();
    let via_path = serve.resolve("localhost:3000", "/subdomain/myblog").unwrap();
    let via_host = serve.resolve("myblog.ntando.store", "/").unwrap();
    let index = env.deployed_path("subdomains/myblog/index.html");
    for outcome in [via_path, via_host] {
        match outcome {
            ServeOutcome::File { path, .. } => assert_eq!(path, index),
            other => panic!("expected index, got {:?}", other),
        }
    }

    // Step 3: redeploy updates in place, same address, same record
    env.deploy_engine()
        .execute(&descriptor, &[env.stage("index.html", "<h1>v2</h1>")])
        .unwrap();
    assert_eq!(
        env.read_deployed("subdomains/myblog/index.html"),
        "<h1>v2</h1>"
    );
    assert_eq!(
        env.store()
            .list_by_tenant(&TenantId::new("42"))
            .unwrap()
            .len(),
        1
    );

    // Step 4: remove, and the host turns into a structured not-found
    env.remove_engine()
        .execute(record.id, &TenantId::new("42"))
        .unwrap();
    assert!(matches!(
        serve.resolve("myblog.ntando.store", "/").unwrap(),
        ServeOutcome::NotFound { .. }
    ));
    assert!(env
        .store()
        .list_by_tenant(&TenantId::new("42"))
        .unwrap()
        .is_empty());
}
