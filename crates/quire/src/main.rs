//! quire CLI - docs search index generator and chat proxy.
//!
//! Provides commands for:
//! - `index`: Write `content.json` for a built documentation site
//! - `serve`: Start the chat proxy server

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{IndexArgs, ServeArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// quire - docs search index generator and chat proxy.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the content index for a built site.
    Index(IndexArgs),
    /// Start the chat proxy server.
    Serve(ServeArgs),
}

fn main() {
    // Load .env before parsing so clap sees PORT / GEMINI_API_KEY.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Index(args) => args.verbose,
        Commands::Serve(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Index(args) => args.execute(),
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(VERSION)),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
