//! Error handling for vellum
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`ViewError`]) returned by every library operation
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - [`ViewError::TemplateNotFound`] - no search path yielded a template for a logical name.
//!   Always surfaced to the caller, never recovered internally.
//! - [`ViewError::Engine`] - failures raised by the template engine adapter (syntax errors,
//!   missing variables). These pass through unmodified.
//! - [`ViewError::Io`] / [`ViewError::Scope`] - reading template files and serializing render
//!   scopes.
//! - [`ViewError::Config`] - invalid configuration.
//!
//! Part class resolution never produces an error: unknown names fall back to the default
//! part class, see [`crate::part::PartBuilder`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use vellum::core::{ViewError, user_friendly_error};
//!
//! let error = ViewError::TemplateNotFound {
//!     name: "articles/show".to_string(),
//!     paths: vec!["templates".to_string()],
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use std::path::Path;

use crate::constants::{MAX_TEMPLATE_SUGGESTIONS, SIMILARITY_THRESHOLD_PERCENT};
use crate::path::available_templates;

/// Errors produced while resolving, compiling and rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// No configured search path contains a template for the requested logical name.
    ///
    /// Carries the requested name and every configured root, in search order.
    #[error("Template {name:?} could not be found in paths:\n{}", format_paths(.paths))]
    TemplateNotFound {
        /// The logical name that was requested (after partial-name translation)
        name: String,
        /// Every configured search path, in precedence order
        paths: Vec<String>,
    },

    /// Error raised by the template engine while compiling or rendering.
    #[error(transparent)]
    Engine(Box<dyn std::error::Error + Send + Sync>),

    /// Reading a template file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The render scope could not be converted into template data.
    #[error("Failed to serialize render scope: {0}")]
    Scope(#[from] serde_json::Error),

    /// The configuration is unusable.
    #[error("Invalid configuration: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },
}

impl ViewError {
    /// Wrap an engine-specific error without altering it.
    pub fn engine(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Engine(Box::new(error))
    }

    /// Check whether this is a missing-template error.
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}

impl From<tera::Error> for ViewError {
    fn from(error: tera::Error) -> Self {
        Self::engine(error)
    }
}

fn format_paths(paths: &[String]) -> String {
    paths.iter().map(|path| format!("- {path}")).collect::<Vec<_>>().join("\n")
}

/// Error wrapper carrying user-facing details and a suggestion.
///
/// Produced by [`user_friendly_error`] and displayed by the CLI.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub error: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with contextual suggestions.
///
/// Walks the error chain looking for a [`ViewError`]; errors wrapped with
/// `anyhow` context are still recognised.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(view_error) = cause.downcast_ref::<ViewError>() {
            return create_error_context(view_error, &error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(format!("{error:#}"))
                .with_suggestion("Check that the file or directory exists and the path is correct");
        }
    }

    ErrorContext::new(format!("{error:#}"))
}

fn create_error_context(view_error: &ViewError, outer: &anyhow::Error) -> ErrorContext {
    match view_error {
        ViewError::TemplateNotFound {
            name,
            paths,
        } => {
            let ctx = ErrorContext::new(view_error.to_string()).with_details(
                "Templates are looked up as <name>.<format>.<ext> and then <name>.<ext> in each \
                 search path, in order",
            );
            let suggestions = suggest_templates(name, paths);
            if suggestions.is_empty() {
                ctx.with_suggestion("Check the template name and the configured search paths")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        ViewError::Engine(_) => ErrorContext::new(format!("{outer:#}"))
            .with_details("The template engine rejected the template or its data"),
        ViewError::Config {
            ..
        } => ErrorContext::new(format!("{outer:#}"))
            .with_suggestion("Check the search paths and options in your configuration file"),
        ViewError::Io(_) | ViewError::Scope(_) => ErrorContext::new(format!("{outer:#}")),
    }
}

/// Find logical template names under the given roots that are close to `name`.
fn suggest_templates(name: &str, paths: &[String]) -> Vec<String> {
    let max_distance = (name.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);

    let mut candidates: Vec<(usize, String)> = paths
        .iter()
        .flat_map(|root| available_templates(Path::new(root)))
        .filter_map(|candidate| {
            let distance = strsim::levenshtein(name, &candidate);
            (distance <= max_distance && candidate != name).then_some((distance, candidate))
        })
        .collect();

    candidates.sort();
    candidates.dedup_by(|a, b| a.1 == b.1);
    candidates.into_iter().take(MAX_TEMPLATE_SUGGESTIONS).map(|(_, candidate)| candidate).collect()
}
