//! Template resolution and rendering.
//!
//! A [`Renderer`] owns an ordered list of [`SearchPath`]s, a target format and a set of
//! engine-specific [`RenderOptions`]. It resolves logical template and partial names to
//! files (first search path with a match wins), compiles them through the
//! [`TemplateCache`] and renders them against a caller-supplied scope.
//!
//! # Examples
//!
//! ```rust,no_run
//! use serde_json::json;
//! use vellum::{Renderer, SearchPath};
//!
//! # fn example() -> Result<(), vellum::ViewError> {
//! let renderer = Renderer::new(
//!     vec![SearchPath::new("app/templates"), SearchPath::new("shared/templates")],
//!     "html",
//! );
//!
//! // app/templates/articles/show.html.tera
//! let page = renderer.template("articles/show", &json!({ "title": "Hello" }), None)?;
//!
//! // app/templates/articles/_comment.html.tera
//! let comment = renderer.partial("articles/comment", &json!({ "body": "Nice" }), None)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::constants::{PARTIAL_PREFIX, PATH_DELIMITER};
use crate::core::ViewError;
use crate::engine::{Block, CompiledTemplate, RenderOptions, TemplateEngine, TeraEngine};
use crate::path::SearchPath;

pub mod cache;

pub use cache::{CacheKey, TemplateCache};

/// Resolves logical template names across search paths and renders them.
///
/// Renderers are immutable values. Equality considers only the search paths, the
/// format and the options; the engine and cache handles are collaborators, not
/// configuration.
#[derive(Clone)]
pub struct Renderer {
    paths: Vec<SearchPath>,
    format: String,
    options: RenderOptions,
    engine: Arc<dyn TemplateEngine>,
    cache: TemplateCache,
}

impl Renderer {
    /// Create a renderer using the Tera engine and the process-wide template cache.
    pub fn new(paths: Vec<SearchPath>, format: impl Into<String>) -> Self {
        Self {
            paths,
            format: format.into(),
            options: RenderOptions::new(),
            engine: Arc::new(TeraEngine::new()),
            cache: TemplateCache::global(),
        }
    }

    /// Replace the engine-specific render options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the template engine adapter.
    #[must_use]
    pub fn with_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Use an isolated template cache instead of the process-wide one.
    #[must_use]
    pub fn with_cache(mut self, cache: TemplateCache) -> Self {
        self.cache = cache;
        self
    }

    /// Search paths in precedence order.
    pub fn paths(&self) -> &[SearchPath] {
        &self.paths
    }

    /// Target format, e.g. `html`.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Engine-specific render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The template cache this renderer compiles into.
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Resolve a logical template name to a file.
    ///
    /// Search paths are scanned in order and the first match wins.
    pub fn lookup(&self, name: &str) -> Option<PathBuf> {
        self.paths.iter().find_map(|path| path.lookup(name, &self.format))
    }

    /// The error reported when `name` resolves in none of the search paths.
    pub fn not_found(&self, name: &str) -> ViewError {
        ViewError::TemplateNotFound {
            name: name.to_string(),
            paths: self.paths.iter().map(ToString::to_string).collect(),
        }
    }

    /// Translate a logical name into its partial name.
    ///
    /// Only the final segment receives the partial marker:
    ///
    /// ```rust
    /// use vellum::Renderer;
    ///
    /// assert_eq!(Renderer::partial_name("articles/comment"), "articles/_comment");
    /// assert_eq!(Renderer::partial_name("comment"), "_comment");
    /// assert_eq!(Renderer::partial_name("articles/comment/"), "articles/_comment");
    /// ```
    pub fn partial_name(name: &str) -> String {
        let name = name.trim_end_matches(PATH_DELIMITER);
        match name.rsplit_once(PATH_DELIMITER) {
            Some((dir, last)) => format!("{dir}{PATH_DELIMITER}{PARTIAL_PREFIX}{last}"),
            None => format!("{PARTIAL_PREFIX}{name}"),
        }
    }

    /// Resolve and render the template named `name`.
    ///
    /// # Errors
    ///
    /// - [`ViewError::TemplateNotFound`] when no search path has a matching file; the
    ///   error carries `name` and every configured search path.
    /// - Engine, IO and scope errors pass through unchanged.
    pub fn template<S>(&self, name: &str, scope: &S, block: Option<Block<'_>>) -> Result<String, ViewError>
    where
        S: Serialize + ?Sized,
    {
        let Some(path) = self.lookup(name) else {
            tracing::debug!("Template {} not found in {} search path(s)", name, self.paths.len());
            return Err(self.not_found(name));
        };

        tracing::debug!("Rendering template {} from {}", name, path.display());
        self.render(&path, scope, block)
    }

    /// Resolve and render the partial named `name` (see [`Renderer::partial_name`]).
    pub fn partial<S>(&self, name: &str, scope: &S, block: Option<Block<'_>>) -> Result<String, ViewError>
    where
        S: Serialize + ?Sized,
    {
        self.template(&Self::partial_name(name), scope, block)
    }

    /// Render an already-resolved template file.
    pub fn render<S>(&self, path: &Path, scope: &S, block: Option<Block<'_>>) -> Result<String, ViewError>
    where
        S: Serialize + ?Sized,
    {
        let scope = serde_json::to_value(scope)?;
        self.compiled(path)?.render(&scope, block)
    }

    /// Derive a renderer whose search paths are all rebased into `dirname`.
    ///
    /// The receiver is left untouched; format, options, engine and cache carry over.
    #[must_use]
    pub fn chdir(&self, dirname: impl AsRef<Path>) -> Self {
        let dirname = dirname.as_ref();
        Self {
            paths: self.paths.iter().map(|path| path.chdir(dirname)).collect(),
            format: self.format.clone(),
            options: self.options.clone(),
            engine: Arc::clone(&self.engine),
            cache: self.cache.clone(),
        }
    }

    fn compiled(&self, path: &Path) -> Result<Arc<dyn CompiledTemplate>, ViewError> {
        let key = CacheKey::new(self.engine.name(), path, &self.options);
        self.cache.get_or_compile(key, || self.engine.compile(path, &self.options))
    }
}

impl PartialEq for Renderer {
    fn eq(&self, other: &Self) -> bool {
        self.paths == other.paths && self.format == other.format && self.options == other.options
    }
}

impl Eq for Renderer {}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("paths", &self.paths)
            .field("format", &self.format)
            .field("options", &self.options)
            .field("engine", &self.engine.name())
            .finish()
    }
}
