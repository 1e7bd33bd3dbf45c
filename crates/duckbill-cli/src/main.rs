use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "duckbill")]
#[command(about = "duckbill - chat your way to a task list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session against the scenario engine
    Chat {
        /// Path to a TOML config file (session timeout etc.)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the builtin scenarios and their trigger words
    Scenarios,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { config } => commands::chat::run(config).await?,
        Commands::Scenarios => commands::scenarios::run(),
    }

    Ok(())
}
