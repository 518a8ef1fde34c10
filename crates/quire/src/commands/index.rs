//! `quire index` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config, MkdocsSettings};
use quire_index::{BuildContext, HookOutcome, IndexedPage, on_post_build};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the index command.
#[derive(Args)]
pub(crate) struct IndexArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read docs_dir, site_dir and site_url from an mkdocs.yml instead.
    #[arg(long, conflicts_with = "config")]
    mkdocs: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Build output directory receiving content.json (overrides config).
    #[arg(short, long)]
    site_dir: Option<PathBuf>,

    /// Published site base URL (overrides config).
    #[arg(long)]
    site_url: Option<String>,

    /// Document extension without the leading dot (overrides config).
    #[arg(long)]
    extension: Option<String>,

    /// Exit with an error if content.json could not be produced.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (log every indexed document).
    #[arg(short, long)]
    pub verbose: bool,
}

impl IndexArgs {
    /// Execute the index command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, or in `--strict` mode if the
    /// index was not written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        output.banner("Generating content index");
        let ctx = self.build_context(&output)?;
        output.info(&format!("Docs: {}", ctx.docs_dir.display()));
        output.info(&format!("Site: {}", ctx.site_dir.display()));

        let outcome = on_post_build(&ctx);
        report(&output, &outcome);

        if self.strict && !outcome.is_success() {
            return Err(CliError::Index("content index was not written".to_owned()));
        }
        Ok(())
    }

    /// Resolve the hook context from mkdocs.yml or quire.toml plus CLI overrides.
    fn build_context(&self, output: &Output) -> Result<BuildContext, CliError> {
        let cli_settings = CliSettings {
            docs_dir: self.docs_dir.clone(),
            site_dir: self.site_dir.clone(),
            site_url: self.site_url.clone(),
            ..CliSettings::default()
        };

        let mut ctx = if let Some(path) = &self.mkdocs {
            let settings = MkdocsSettings::load(path)?;
            output.info(&format!("Config: {}", path.display()));
            BuildContext::new(
                cli_settings.docs_dir.unwrap_or(settings.docs_dir),
                cli_settings.site_dir.unwrap_or(settings.site_dir),
                cli_settings.site_url.unwrap_or(settings.site_url),
            )
        } else {
            let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
            if let Some(path) = &config.config_path {
                output.info(&format!("Config: {}", path.display()));
            }
            let docs = config.docs_resolved;
            let mut ctx = BuildContext::new(docs.docs_dir, docs.site_dir, docs.site_url);
            ctx.extension = config.index.extension;
            ctx
        };

        if let Some(extension) = &self.extension {
            ctx.extension.clone_from(extension);
        }

        if ctx.extension.is_empty() || ctx.extension.starts_with('.') {
            return Err(CliError::Index(format!(
                "extension must be non-empty and without a leading dot, got \"{}\"",
                ctx.extension
            )));
        }

        Ok(ctx)
    }
}

/// Print the summary for a hook outcome.
fn report(output: &Output, outcome: &HookOutcome) {
    match outcome {
        HookOutcome::Written {
            path,
            pages,
            skipped,
        } => {
            print_pages(output, pages);
            output.success(&format!("Processed {} pages", pages.len()));
            if *skipped > 0 {
                output.warning(&format!("Skipped {skipped} unreadable pages"));
            }
            output.info(&format!("Wrote {}", path.display()));
        }
        HookOutcome::WriteFailed { path, pages, error } => {
            print_pages(output, pages);
            output.info(&format!("Processed {} pages", pages.len()));
            output.error(&format!("Failed to write {}: {error}", path.display()));
        }
        HookOutcome::ScanFailed { error } => {
            output.error(&format!("Failed to scan docs: {error}"));
        }
    }
}

/// Print one progress line per indexed document.
fn print_pages(output: &Output, pages: &[IndexedPage]) {
    for page in pages {
        output.info(&format!("[OK] {} -> {}", page.name, page.url));
    }
}
