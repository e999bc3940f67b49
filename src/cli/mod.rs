//! Command-line interface for vellum.
//!
//! # Commands
//!
//! - `render` - Resolve a template (or partial) and render it with JSON data
//! - `lookup` - Print the file a logical template name resolves to
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--config <PATH>` - Use a specific configuration file (env: `VELLUM_CONFIG`)
//!
//! # Examples
//!
//! ```bash
//! # Render templates/articles/show.html.tera with data from article.json
//! vellum render articles/show --data article.json
//!
//! # Render the partial templates/articles/_comment.html.tera as a part named `comment`
//! vellum render articles/comment --partial --as comment --data comment.json
//!
//! # Override configured search paths and format
//! vellum lookup home --path app/templates --path shared/templates --format txt
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::config::ViewConfig;
use crate::engine::RenderOptions;

mod lookup;
mod render;

pub use lookup::LookupCommand;
pub use render::RenderCommand;

/// Template rendering and view-part decoration.
#[derive(Parser, Debug)]
#[command(name = "vellum", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file (defaults to ./vellum.toml when present).
    #[arg(long, global = true, env = "VELLUM_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template with JSON data
    Render(RenderCommand),
    /// Print the file a template name resolves to
    Lookup(LookupCommand),
}

/// Options shared by commands that resolve templates.
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Logical template name, e.g. `articles/show`
    pub name: String,

    /// Treat the name as a partial (`articles/comment` -> `articles/_comment`)
    #[arg(long)]
    pub partial: bool,

    /// Template search path; repeat to add more. Replaces configured paths.
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<String>,

    /// Target format, e.g. `html`
    #[arg(long)]
    pub format: Option<String>,

    /// Engine option as KEY=VALUE; VALUE is parsed as JSON when possible
    #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, Value)>,
}

impl TemplateArgs {
    /// Layer command-line overrides over the loaded configuration.
    pub fn apply_to(&self, mut config: ViewConfig) -> ViewConfig {
        if !self.paths.is_empty() {
            config.paths = self.paths.clone();
            // command-line paths are relative to the working directory
            config.base_dir = None;
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
        config.options.extend(self.options.iter().cloned());
        config
    }

    /// The name to resolve, translated for partials.
    pub fn logical_name(&self) -> String {
        if self.partial {
            crate::renderer::Renderer::partial_name(&self.name)
        } else {
            self.name.clone()
        }
    }
}

fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("option key must not be empty in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let config = ViewConfig::load_or_default(self.config.as_deref(), &cwd).await?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(config).await,
            Commands::Lookup(cmd) => cmd.execute(config),
        }
    }

    /// Log level implied by the verbosity flags; `None` disables logging.
    pub fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            None
        } else {
            Some("warn")
        }
    }

    fn init_logging(&self) {
        let Some(level) = self.log_level() else {
            return;
        };

        // RUST_LOG wins unless --verbose was given
        let filter = if self.verbose {
            EnvFilter::new(level)
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Read a JSON document from `path`.
pub(crate) async fn read_json(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

/// Render options given on the command line, for display in debug logs.
pub(crate) fn describe_options(options: &RenderOptions) -> String {
    options.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join(", ")
}
