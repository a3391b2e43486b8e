use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use petstore::{
    config::Config,
    server::{self, ServerSettings},
    store::{PetId, PetStore},
    telemetry,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "In-memory pet store API server")]
struct Cli {
    /// Path to a YAML config file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the first id handed out by the store
    #[arg(long)]
    starting_id: Option<PetId>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_yaml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(starting_id) = cli.starting_id {
        config.store.starting_id = starting_id;
    }
    config.validate()?;

    telemetry::init(&config.logging.level, cli.verbose);
    info!(starting_id = config.store.starting_id, "starting pet store");

    let store = Arc::new(PetStore::with_starting_id(config.store.starting_id));
    let settings = ServerSettings {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    server::run(settings, store).await
}
