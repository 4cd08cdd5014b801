//! Sitedock CLI definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sitedock - multi-tenant static site deployment and routing engine
#[derive(Parser, Debug)]
#[command(name = "sitedock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a sitedock.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events and a JSON result (for CI / scripting)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a set of files as a static site
    Deploy {
        /// Tenant that owns the deployment
        #[arg(short, long)]
        tenant: String,

        /// Site name (directory label in path mode)
        #[arg(short, long)]
        site: String,

        /// Domain: a platform suffix (with --subdomain), a full
        /// platform-owned name, or an external custom domain
        #[arg(short, long)]
        domain: Option<String>,

        /// Subdomain label under a platform-owned suffix
        #[arg(long)]
        subdomain: Option<String>,

        /// Files to deploy
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List a tenant's deployments, newest first
    List {
        /// Tenant whose deployments to list
        #[arg(short, long)]
        tenant: String,
    },

    /// Remove a deployment (files and record)
    Remove {
        /// Tenant requesting the removal (must own the deployment)
        #[arg(short, long)]
        tenant: String,

        /// Deployment id
        #[arg(long)]
        id: u64,
    },

    /// Resolve a request (host + path) to the file that would be served
    Resolve {
        /// Inbound Host header
        #[arg(long)]
        host: String,

        /// Request path
        #[arg(long, default_value = "/")]
        path: String,
    },
}
