//! Main entry point for CLI command to start server.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::configuration::generate_config_schema;
use crate::configuration::Configuration;
use crate::schema::LibrarySchema;
use crate::server::HttpServer;
use crate::store::DataStore;

/// Options for the library graph
#[derive(Parser, Debug)]
#[command(
    name = "library-graph",
    about = "GraphQL server over an in-memory library of books and authors"
)]
pub(crate) struct Opt {
    /// Log level (off|error|warn|info|debug|trace).
    #[arg(
        long = "log",
        default_value = "info",
        alias = "log-level",
        env = "LIBRARY_GRAPH_LOG"
    )]
    log_level: String,

    /// Configuration location relative to the current directory.
    #[arg(short, long = "config", env = "LIBRARY_GRAPH_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Prints the configuration schema.
    #[arg(long)]
    schema: bool,

    /// Prints the GraphQL schema in SDL.
    #[arg(long)]
    sdl: bool,

    /// Display version and exit.
    #[arg(long, short = 'V')]
    version: bool,
}

/// This is the main entrypoint.
pub fn main() -> Result<()> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(nb) = std::env::var("LIBRARY_GRAPH_NUM_CORES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
    {
        builder.worker_threads(nb);
    }
    let runtime = builder.build()?;
    runtime.block_on(start(Opt::parse()))
}

async fn start(opt: Opt) -> Result<()> {
    if opt.version {
        println!("{}", std::env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if opt.schema {
        let schema = generate_config_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    init_logging(&opt.log_level)?;

    let configuration = match &opt.config_path {
        Some(path) => {
            let path = if path.is_relative() {
                std::env::current_dir()?.join(path)
            } else {
                path.clone()
            };
            Configuration::from_file(&path)?
        }
        None => Configuration::default(),
    };

    let store = Arc::new(DataStore::default());
    let schema = LibrarySchema::new(store, &configuration.graphql)?;

    if opt.sdl {
        println!("{}", schema.sdl());
        return Ok(());
    }

    setup_panic_handler();

    let server = HttpServer::bind(&configuration.server, Arc::new(schema)).await?;
    if let Err(err) = server.serve(shutdown_signal()).await {
        tracing::error!("{}", err);
        return Err(err.into());
    }
    Ok(())
}

fn init_logging(log_level: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt::fmt().with_env_filter(
        EnvFilter::try_new(log_level).context("could not parse log configuration")?,
    );

    let installed = if std::io::stdout().is_terminal() {
        builder.try_init()
    } else {
        builder.json().try_init()
    };
    installed.map_err(|err| anyhow::anyhow!("could not install the log subscriber: {err}"))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received ctrl-c, shutting down"),
        Err(err) => tracing::error!("could not listen for ctrl-c: {}", err),
    }
}

fn setup_panic_handler() {
    // Redirect panics to the logs.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("{}", info);
    }));
}
