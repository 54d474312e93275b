use sowa_cli::{logging, providers, remove, save, status, SaveArgs};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sowa", version, about = "Configure the LLM provider used for SOW analysis")]
struct Cli {
    /// Path to the settings file (defaults to the user config directory)
    #[arg(long, env = "SOWA_STORE", global = true)]
    store: Option<PathBuf>,
    /// Verbosity level (use -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the saved LLM configuration
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported providers and the fields each one needs
    Providers,
    /// Save a configuration for a provider
    Save {
        /// Provider identifier (openai, anthropic, google, local, openai-compatible)
        #[arg(long)]
        provider: String,
        /// API key
        #[arg(long)]
        api_key: Option<String>,
        /// Endpoint base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Model identifier
        #[arg(long = "model")]
        model_name: Option<String>,
    },
    /// Remove the saved configuration
    Remove,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = match cli.store {
        Some(path) => path,
        None => sowa_cli::config::default_store_path()
            .context("Could not determine a config directory; pass --store")?,
    };

    match cli.command {
        Some(command) => {
            logging::init_stderr(cli.verbose);
            match command {
                Commands::Status { json } => status(&store, json),
                Commands::Providers => providers(),
                Commands::Save { provider, api_key, base_url, model_name } => {
                    save(&store, SaveArgs { provider, api_key, base_url, model_name }).map(|_| ())
                }
                Commands::Remove => remove(&store).map(|_| ()),
            }
        }
        None => {
            let log_dir = store
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let _guard = logging::init_file(log_dir, cli.verbose);
            sowa_cli::tui::run(store).await
        }
    }
}
