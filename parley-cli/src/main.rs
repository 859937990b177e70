//! CLI entry point for parley

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use parley_core::config::{Config, ConfigLoader};
use parley_core::logging::init_logging;
use parley_core::{Error, SessionManager};
use parley_providers::AzureFactory;
use parley_server::{run_server, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;
use tracing::info;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "A conversational relay to a remote completion service")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Start an interactive chat session in the terminal
    Chat {
        /// Session id for conversation continuity
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Show configuration status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    let config = loader.load()?;
    let _guard = init_logging(&config.logging);

    match cli.command {
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            run_serve(config).await?;
        }
        Commands::Chat { session } => {
            run_chat(config, session).await?;
        }
        Commands::Status => {
            run_status(&loader, &config);
        }
    }

    Ok(())
}

fn build_manager(config: &Config) -> Arc<SessionManager> {
    let factory = Arc::new(AzureFactory::new(config.provider.azure_settings()));
    Arc::new(SessionManager::with_options(
        factory,
        config.chat.persona.clone(),
        Duration::from_secs(config.provider.request_timeout_secs),
        config.chat.max_sessions,
    ))
}

async fn run_serve(config: Config) -> Result<()> {
    let manager = build_manager(&config);
    let state = AppState::new(manager);

    println!("{}", style("Starting parley server...").bold().cyan());
    println!("Deployment: {}", config.provider.deployment);
    println!(
        "Listening on http://{}:{}",
        config.server.host, config.server.port
    );
    println!("Press Ctrl+C to stop.");

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, shutting down");
            let _ = shutdown_tx.send(());
        }
    });

    run_server(state, &config.server, shutdown_rx).await
}

async fn run_chat(config: Config, session: Option<String>) -> Result<()> {
    let manager = build_manager(&config);
    let session_id = session.unwrap_or_else(|| "cli".to_string());

    println!("{}", style("parley interactive chat").bold().cyan());
    println!("Deployment: {}", config.provider.deployment);
    println!("Type 'clear' to reset the conversation, 'quit' or 'exit' to leave.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(style("you> ").green().to_string().as_bytes()).await?;
        stdout.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "clear" => {
                manager.clear(&session_id).await;
                println!("{}", style("Conversation cleared.").dim());
                continue;
            }
            _ => {}
        }

        match manager.send(&session_id, input).await {
            Ok(reply) => {
                println!("{} {}\n", style("assistant>").cyan(), reply);
            }
            Err(Error::Config(msg)) => {
                // No credentials means no session can ever be created;
                // bail instead of looping on the same failure.
                anyhow::bail!(msg);
            }
            Err(err) => {
                // A failed turn leaves the conversation intact
                println!("{} {}\n", style("error>").red(), err);
            }
        }
    }

    println!("{}", style("Goodbye!").dim());
    Ok(())
}

fn run_status(loader: &ConfigLoader, config: &Config) {
    println!("{}", style("Parley Status").bold().cyan());
    println!("Version: 0.1.0\n");

    println!("{}", style("Configuration:").bold());
    println!("  Config directory: {}", loader.config_dir().display());
    println!("  Deployment: {}", config.provider.deployment);
    println!("  API version: {}", config.provider.api_version);
    println!();

    println!("{}", style("Provider connection:").bold());
    let endpoint = if config.provider.endpoint.is_empty() {
        style("not configured").red()
    } else {
        style("configured").green()
    };
    let api_key = if config.provider.api_key.is_empty() {
        style("not configured").red()
    } else {
        style("configured").green()
    };
    println!("  Endpoint: {}", endpoint);
    println!("  API key: {}", api_key);
    println!();

    println!("{}", style("Server:").bold());
    println!("  Bind: {}:{}", config.server.host, config.server.port);
    match &config.server.static_dir {
        Some(dir) => println!("  Static assets: {}", dir),
        None => println!("  Static assets: {}", style("disabled").dim()),
    }
    println!();

    println!("{}", style("Chat:").bold());
    match config.chat.max_sessions {
        Some(cap) => println!("  Session limit: {}", cap),
        None => println!("  Session limit: {}", style("unbounded").dim()),
    }
    let persona_preview: String = config.chat.persona.chars().take(60).collect();
    println!("  Persona: {}...", persona_preview);
}
