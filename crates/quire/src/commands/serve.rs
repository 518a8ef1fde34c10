//! `quire serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config, SystemInstructionMode};
use quire_server::{run_server, server_config_from_quire_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Upstream API key (overrides config).
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Where to place the client system instruction: "prefix" or "native".
    #[arg(long)]
    system_instruction: Option<SystemInstructionMode>,

    /// Enable verbose output (request tracing).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            api_key: self.api_key,
            system_instruction: self.system_instruction,
            ..CliSettings::default()
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Model: {}", quire_server::MODEL));

        if config.chat.api_key().is_some() {
            output.info("Chat: configured");
        } else {
            output.warning("Chat: GEMINI_API_KEY not set, /api/chat will return 503");
        }

        let server_config = server_config_from_quire_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
