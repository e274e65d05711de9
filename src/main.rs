//! Builder-catalogue insights CLI.
//!
//! Thin caller over [`catalogue_insights::InsightsService`]: parses
//! arguments, runs one insight operation against the configured catalogue
//! endpoint, and prints the result as pretty JSON. All matching semantics
//! live in the library crates.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use catalogue_insights::{InsightsService, MemoryStore};
use catalogue_transport::HttpCatalogueSource;
use catalogue_types::env_utils::env_var_or;

const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Upstream catalogue API base URL (env: CATALOGUE_API_URL).
    #[arg(long, default_value_t = default_endpoint())]
    endpoint: String,

    /// JSON file of assembly details used to pre-warm the cache.
    #[arg(long)]
    seed_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List assemblies the owner can build with exact colors.
    Buildable { owner: String },

    /// Find owners who can individually supply every missing piece.
    Collaborators {
        owner: String,
        /// Assembly id, or its name when --by-name is set.
        assembly: String,
        /// Resolve the assembly by name instead of id.
        #[arg(long)]
        by_name: bool,
    },

    /// Recommend a build size from a percentile of comparable owners.
    BuildSize {
        owner: String,
        #[arg(long, default_value_t = 0.5)]
        percentile: f64,
    },

    /// List assemblies buildable once color substitution is allowed.
    ColorFlex { owner: String },
}

fn default_endpoint() -> String {
    env_var_or("CATALOGUE_API_URL", DEFAULT_ENDPOINT.to_owned())
}

async fn run(cli: Cli) -> Result<Value> {
    let source = HttpCatalogueSource::new(&cli.endpoint);
    let store = Arc::new(match &cli.seed_file {
        Some(path) => MemoryStore::with_seed_file(path),
        None => MemoryStore::default(),
    });
    let service = InsightsService::with_store(source, store);

    let value = match cli.command {
        Command::Buildable { owner } => {
            serde_json::to_value(service.buildable_assemblies(&owner).await?)
        }
        Command::Collaborators { owner, assembly, by_name } => {
            let assembly_id = if by_name {
                service.resolve_assembly_id(&assembly).await?
            } else {
                assembly
            };
            serde_json::to_value(service.find_collaborator(&owner, &assembly_id).await?)
        }
        Command::BuildSize { owner, percentile } => {
            serde_json::to_value(service.recommend_build_size(&owner, percentile).await?)
        }
        Command::ColorFlex { owner } => {
            serde_json::to_value(service.color_flexible_assemblies(&owner).await?)
        }
    };
    value.context("serializing response")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let value = run(cli).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
