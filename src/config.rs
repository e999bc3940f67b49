//! Renderer configuration (`vellum.toml`).
//!
//! The configuration names the template search paths, the target format and the
//! engine options a [`Renderer`] is built with.
//!
//! # File Format
//!
//! ```toml
//! # Target format; templates are looked up as <name>.<format>.<ext> first
//! format = "html"
//!
//! # Search roots in precedence order. Relative roots resolve against the
//! # directory containing this file; `~` expands to the home directory.
//! paths = ["templates", "~/shared/templates"]
//!
//! # Engine options, passed through to the template engine unchanged
//! [options]
//! autoescape = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_FORMAT};
use crate::core::ViewError;
use crate::engine::RenderOptions;
use crate::path::SearchPath;
use crate::renderer::Renderer;

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn is_default_format(format: &str) -> bool {
    format == DEFAULT_FORMAT
}

/// Renderer configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Target format, e.g. `html`.
    #[serde(default = "default_format", skip_serializing_if = "is_default_format")]
    pub format: String,

    /// Template search roots in precedence order.
    #[serde(default)]
    pub paths: Vec<String>,

    /// Engine-specific render options.
    #[serde(default, skip_serializing_if = "RenderOptions::is_empty")]
    pub options: RenderOptions,

    /// Directory relative search roots resolve against. Set by [`ViewConfig::load_from`].
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            paths: Vec::new(),
            options: RenderOptions::new(),
            base_dir: None,
        }
    }
}

impl ViewConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (permissions, not found, etc.)
    /// - The file contains invalid TOML syntax
    /// - The TOML structure doesn't match the expected schema
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!(
            "Loaded config from {} ({} search path(s), format={})",
            path.display(),
            config.paths.len(),
            config.format
        );
        Ok(config)
    }

    /// Load configuration from `path` if given, otherwise from `vellum.toml` in `dir`.
    ///
    /// An explicitly given path must exist. A missing `vellum.toml` in `dir` yields the
    /// default configuration.
    pub async fn load_or_default(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path).await;
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&candidate).await.unwrap_or(false) {
            Self::load_from(&candidate).await
        } else {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            Ok(Self {
                base_dir: Some(dir.to_path_buf()),
                ..Self::default()
            })
        }
    }

    /// Resolve the configured search roots.
    ///
    /// `~` is expanded and relative roots are joined onto [`ViewConfig::base_dir`].
    pub fn search_paths(&self) -> Vec<SearchPath> {
        self.paths
            .iter()
            .map(|root| {
                let expanded = PathBuf::from(shellexpand::tilde(root).as_ref());
                match &self.base_dir {
                    Some(base) if expanded.is_relative() => SearchPath::new(base.join(expanded)),
                    _ => SearchPath::new(expanded),
                }
            })
            .collect()
    }

    /// Build a renderer from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Config`] when no search path is configured or the format
    /// is empty.
    pub fn build_renderer(&self) -> Result<Renderer, ViewError> {
        if self.paths.is_empty() {
            return Err(ViewError::Config {
                message: "no template search paths configured".to_string(),
            });
        }
        if self.format.trim().is_empty() {
            return Err(ViewError::Config {
                message: "format must not be empty".to_string(),
            });
        }

        Ok(Renderer::new(self.search_paths(), self.format.clone()).with_options(self.options.clone()))
    }
}
