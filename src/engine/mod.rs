//! Template engine adapter contract.
//!
//! The renderer never parses templates itself. It depends only on this shape:
//!
//! - [`TemplateEngine::compile`]: `compile(path, options) -> renderable`
//! - [`CompiledTemplate::render`]: `renderable.render(scope, block) -> string`
//!
//! Any conforming engine is substitutable: the bundled [`TeraEngine`], a single
//! hard-coded engine, or a mock in tests. Engine errors are returned as
//! [`ViewError::Engine`](crate::core::ViewError::Engine) and are never rewritten
//! by the core.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::core::ViewError;

pub mod tera_engine;

pub use tera_engine::TeraEngine;

/// Engine-specific render options.
///
/// Keys are unique and ordered, so two option maps with the same entries compare
/// and serialize identically regardless of insertion order. Their meaning is
/// opaque to the core.
pub type RenderOptions = BTreeMap<String, Value>;

/// Callback producing block content for engines that support yielding.
pub type Block<'a> = &'a dyn Fn() -> Result<String, ViewError>;

/// A compiled, renderable template.
pub trait CompiledTemplate: Send + Sync + fmt::Debug {
    /// Render against `scope`, optionally making `block` content available.
    fn render(&self, scope: &Value, block: Option<Block<'_>>) -> Result<String, ViewError>;
}

/// Compiles template files into [`CompiledTemplate`]s.
pub trait TemplateEngine: Send + Sync + fmt::Debug {
    /// Stable identifier of the engine, used to namespace cached templates.
    fn name(&self) -> &str;

    /// Compile the template at `path` with the given options.
    fn compile(
        &self,
        path: &Path,
        options: &RenderOptions,
    ) -> Result<Arc<dyn CompiledTemplate>, ViewError>;
}
