//! Tera adapter for the template engine contract.
//!
//! Each compiled template owns a private `Tera` instance holding exactly one
//! template, registered under the file's path. Scopes are converted to a
//! `tera::Context`; a non-object scope is exposed as the `value` variable and
//! block content, when given, as `content`.
//!
//! # Options
//!
//! - `autoescape` (bool, default `false`): HTML-escape every `{{ }}` expression.
//!
//! All other option keys are ignored by this adapter.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tera::{Context as TeraContext, Tera};

use super::{Block, CompiledTemplate, RenderOptions, TemplateEngine};
use crate::core::ViewError;

/// Variable block content is exposed under.
pub const BLOCK_VARIABLE: &str = "content";

/// Variable a non-object scope is exposed under.
pub const VALUE_VARIABLE: &str = "value";

/// Template engine backed by Tera.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraEngine;

impl TeraEngine {
    /// Create a new Tera engine adapter.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateEngine for TeraEngine {
    fn name(&self) -> &str {
        "tera"
    }

    fn compile(
        &self,
        path: &Path,
        options: &RenderOptions,
    ) -> Result<Arc<dyn CompiledTemplate>, ViewError> {
        let source = std::fs::read_to_string(path)?;
        let name = path.display().to_string();

        let mut tera = Tera::default();
        let autoescape = options.get("autoescape").and_then(Value::as_bool).unwrap_or(false);
        if autoescape {
            // An empty suffix matches every template name
            tera.autoescape_on(vec![""]);
        } else {
            tera.autoescape_on(vec![]);
        }

        tera.add_raw_template(&name, &source)?;

        tracing::debug!("Compiled Tera template {} (autoescape={})", name, autoescape);

        Ok(Arc::new(TeraTemplate {
            tera,
            name,
        }))
    }
}

/// A single template compiled by [`TeraEngine`].
#[derive(Debug)]
pub struct TeraTemplate {
    tera: Tera,
    name: String,
}

impl CompiledTemplate for TeraTemplate {
    fn render(&self, scope: &Value, block: Option<Block<'_>>) -> Result<String, ViewError> {
        let mut context = match scope {
            Value::Object(_) => TeraContext::from_value(scope.clone())?,
            other => {
                let mut context = TeraContext::new();
                context.insert(VALUE_VARIABLE, other);
                context
            }
        };

        if let Some(block) = block {
            context.insert(BLOCK_VARIABLE, &block()?);
        }

        Ok(self.tera.render(&self.name, &context)?)
    }
}
