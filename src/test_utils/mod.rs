//! Test utilities for vellum
//!
//! Helpers shared by unit and integration tests: one-time logging setup and an
//! instrumented template engine for observing cache behaviour.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vellum::test_utils::CountingEngine;
//! use vellum::{Renderer, SearchPath, TemplateCache};
//!
//! let engine = Arc::new(CountingEngine::new());
//! let renderer = Renderer::new(vec![SearchPath::new("templates")], "html")
//!     .with_engine(engine.clone())
//!     .with_cache(TemplateCache::new());
//!
//! let _ = renderer.template("home", &serde_json::json!({}), None);
//! assert!(engine.compile_count() <= 1);
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::ViewError;
use crate::engine::{CompiledTemplate, RenderOptions, TemplateEngine, TeraEngine};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Source of unique engine names, so caches never mix templates across instances.
static NEXT_ENGINE_ID: AtomicUsize = AtomicUsize::new(0);

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=vellum=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A [`TeraEngine`] wrapper that counts compilations.
///
/// Each instance reports a distinct engine name, so two counting engines sharing one
/// [`TemplateCache`](crate::TemplateCache) never see each other's entries.
#[derive(Debug)]
pub struct CountingEngine {
    name: String,
    inner: TeraEngine,
    compiles: AtomicUsize,
}

impl CountingEngine {
    /// Create a counting engine with a zero count.
    pub fn new() -> Self {
        let id = NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            name: format!("counting-{id}"),
            inner: TeraEngine::new(),
            compiles: AtomicUsize::new(0),
        }
    }

    /// Number of times [`TemplateEngine::compile`] has been called.
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }
}

impl Default for CountingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for CountingEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn compile(&self, path: &Path, options: &RenderOptions) -> Result<Arc<dyn CompiledTemplate>, ViewError> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(path, options)
    }
}
