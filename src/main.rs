// ABOUTME: Entry point for the docklog CLI application.
// ABOUTME: Resolves configuration, pings the runtime once and dispatches commands.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use docklog::config::Config;
use docklog::error::Result;
use docklog::logs::LogWindow;
use docklog::runtime::{BollardRuntime, Connection, RuntimeEndpoint};
use docklog::server::{self, AppState};
use docklog::types::ContainerId;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir()?;
    let mut config = Config::resolve(&cwd, cli.config.as_deref())?;
    if let Some(ref host) = cli.host {
        config.host = RuntimeEndpoint::parse(host)?;
    }

    tracing::debug!(host = %config.host, "connecting to container runtime");
    let connection =
        Connection::establish(BollardRuntime::connect(&config.host, config.timeout)).await;
    let state = AppState::new(connection, config.stop_timeout);

    match cli.command {
        Commands::Serve { bind } => server::serve(bind.unwrap_or(config.bind), state).await,
        Commands::Ps { all } => {
            let containers = state.registry.list(all).await?;
            println!("{}", serde_json::to_string_pretty(&containers)?);
            Ok(())
        }
        Commands::Logs {
            id,
            since,
            until,
            tail,
        } => {
            let window = LogWindow::new(since, until, tail);
            let entries = state.logs.retrieve(&ContainerId::new(id), &window).await?;
            for entry in &entries {
                println!("{}", serde_json::to_string(entry)?);
            }
            Ok(())
        }
        Commands::Inspect { id } => {
            let info = state.registry.inspect(&ContainerId::new(id)).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
        Commands::Start { id } => {
            let id = ContainerId::new(id);
            state.registry.start(&id).await?;
            println!("Started {id}");
            Ok(())
        }
        Commands::Stop { id } => {
            let id = ContainerId::new(id);
            state.registry.stop(&id).await?;
            println!("Stopped {id}");
            Ok(())
        }
    }
}
