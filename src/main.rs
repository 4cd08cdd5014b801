//! Sitedock CLI - drive the deployment engine from the command line
//!
//! The HTTP surface of a real installation calls the same use cases; the
//! CLI stages local files the way the upload transport would and prints
//! the engine's outcome.

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use sitedock::domain::entities::{DeploymentId, Descriptor, StagedFile, TenantId};
use sitedock::domain::ports::EventSink;
use sitedock::domain::services::{PathResolver, RequestRouter};
use sitedock::infrastructure::{JsonDeploymentStore, JsonEventSink, LocalFs, PathLocks};
use sitedock::{DeployUseCase, EngineConfig, RemoveUseCase, ServeOutcome, ServeUseCase};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    config.validate()?;

    let store = JsonDeploymentStore::new(config.store_path());
    let locks = Arc::new(PathLocks::new());
    let events: Arc<dyn EventSink> = if cli.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(sitedock::domain::ports::NoopEventSink)
    };

    match cli.command {
        Commands::Deploy {
            tenant,
            site,
            domain,
            subdomain,
            files,
        } => {
            let mut descriptor = Descriptor::new(tenant, site);
            descriptor.domain = domain;
            descriptor.subdomain = subdomain;

            // Stage inputs the way the upload transport would: the engine
            // consumes (and deletes) its staged copies, never the originals.
            let staging = tempfile::tempdir().context("cannot create staging directory")?;
            let staged = stage_files(&files, staging.path())?;

            let deploy = DeployUseCase::new(
                PathResolver::new(config.clone()),
                store,
                LocalFs::new(),
                locks,
            )
            .with_event_sink(events);

            let outcome = deploy.execute(&descriptor, &staged)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("deployed: {}", outcome.external_url);
                println!("storage:  {}", outcome.storage_path.display());
                for warning in &outcome.warnings {
                    eprintln!("warning: {}", warning);
                }
            }
        }

        Commands::List { tenant } => {
            use sitedock::domain::ports::DeploymentStore;
            let records = store.list_by_tenant(&TenantId::new(tenant))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("no deployments");
            } else {
                for d in records {
                    println!(
                        "{:>4}  {:<20} {:<28} {}",
                        d.id,
                        d.site_name,
                        d.domain.as_deref().unwrap_or("-"),
                        d.storage_path.display()
                    );
                }
            }
        }

        Commands::Remove { tenant, id } => {
            let remove = RemoveUseCase::new(
                config.storage_root.clone(),
                store,
                LocalFs::new(),
                locks,
            )
            .with_event_sink(events);

            let outcome = remove.execute(DeploymentId::new(id), &TenantId::new(tenant))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("removed deployment {}", outcome.id);
                for warning in &outcome.warnings {
                    eprintln!("warning: {}", warning);
                }
            }
        }

        Commands::Resolve { host, path } => {
            let serve = ServeUseCase::new(RequestRouter::new(config), LocalFs::new());
            let outcome = serve.resolve(&host, &path)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                match outcome {
                    ServeOutcome::File { path, .. } => println!("{}", path.display()),
                    ServeOutcome::NotFound { site } => {
                        println!("not deployed yet: {}", site)
                    }
                    ServeOutcome::NotOwned => println!("not a deployment request"),
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            let default = dirs::config_dir().map(|d| d.join("sitedock").join("sitedock.toml"));
            match default {
                Some(path) if path.exists() => EngineConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display())),
                _ => Ok(EngineConfig::default()),
            }
        }
    }
}

fn stage_files(inputs: &[PathBuf], staging: &std::path::Path) -> Result<Vec<StagedFile>> {
    let mut staged = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.iter().enumerate() {
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} has no usable file name", input.display()))?
            .to_string();

        let staged_path = staging.join(format!("{}-{}", index, name));
        std::fs::copy(input, &staged_path)
            .with_context(|| format!("staging {}", input.display()))?;
        let size = std::fs::metadata(&staged_path)?.len();

        staged.push(StagedFile::new(
            name,
            staged_path,
            size,
            "application/octet-stream",
        ));
    }

    Ok(staged)
}
