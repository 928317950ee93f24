//! # Savi — storefront support chatbot
//!
//! Usage:
//!   savi                          # Start the HTTP gateway (default port 3000)
//!   savi serve --port 8080        # Custom port
//!   savi ask "do you have gujiya" # One-shot query from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use savi_core::SaviConfig;
use savi_engine::Engine;
use savi_knowledge::{Catalog, KnowledgeBase};

#[derive(Parser)]
#[command(name = "savi", version, about = "🧶 Savi — support chatbot for a crochet & homemade-food storefront")]
struct Cli {
    /// Path to config file (default: ~/.savi/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Answer a single query and exit
    Ask {
        /// The question to ask
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "savi=debug,tower_http=debug"
    } else {
        "savi=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let path = shellexpand::tilde(path).to_string();
            SaviConfig::load_from(std::path::Path::new(&path))?
        }
        None => SaviConfig::load()?,
    };

    // Knowledge and catalog are built once; the engine only ever reads
    // them. Changing products means restarting with a new snapshot.
    let catalog = Catalog::builtin();
    let knowledge = KnowledgeBase::builtin(&catalog);
    let generator = savi_providers::create_generator(&config)?;
    let engine = Engine::new(&config, knowledge, catalog, generator);

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            let port = port.unwrap_or(config.gateway.port);

            tracing::info!("🧶 Savi v{}", env!("CARGO_PKG_VERSION"));
            tracing::info!("   🤖 Generator: {} ({})", config.llm.provider, config.llm.model);
            tracing::info!("   🛍️ Catalog: {} products", engine.catalog().len());

            let state = savi_gateway::AppState::new(engine);
            savi_gateway::serve(state, &host, port)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
        }
        Command::Ask { message } => {
            let message = message.trim();
            if message.is_empty() {
                anyhow::bail!("message must not be empty");
            }
            let result = engine.process_query(message).await;
            println!("{}", result.response);
            if !result.suggestions.is_empty() {
                println!();
                for s in &result.suggestions {
                    println!("  → {} ({})", s.text, s.link);
                }
            }
        }
    }

    Ok(())
}
