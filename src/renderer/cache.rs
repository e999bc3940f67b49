//! Compiled template cache shared by renderers.
//!
//! Compiling a template is the only side effect of rendering. This cache makes it
//! happen at most once per `(engine, path, options)` for the lifetime of the cache,
//! which for [`TemplateCache::global`] is the lifetime of the process.
//!
//! # Concurrency
//!
//! Entries live in a `DashMap` of per-key slots. The map's shard lock is held only
//! long enough to fetch or create a slot; compilation runs under the slot's own
//! mutex. Two callers racing on the same key are serialized and the second one
//! receives the first one's compiled object, while callers on different keys never
//! wait on each other.
//!
//! # Invalidation
//!
//! Entries are never evicted. A failed compile stores nothing, so the next request
//! for that key tries again.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::core::ViewError;
use crate::engine::{CompiledTemplate, RenderOptions};

/// Cache key for a compiled template.
///
/// Uniquely identifies a compiled template based on:
/// - The engine that compiled it
/// - The resolved template file path
/// - A digest of the render options (order-independent, see [`RenderOptions`])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    engine: String,
    path: PathBuf,
    options_digest: String,
}

impl CacheKey {
    /// Build a cache key for `path` compiled by `engine` with `options`.
    pub fn new(engine: &str, path: &Path, options: &RenderOptions) -> Self {
        Self {
            engine: engine.to_string(),
            path: path.to_path_buf(),
            options_digest: options_digest(options),
        }
    }

    /// The template file path this key refers to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Compute a stable `sha256:<hex>` digest of render options.
///
/// `RenderOptions` is ordered, so its canonical JSON does not depend on the
/// order entries were inserted in.
pub fn options_digest(options: &RenderOptions) -> String {
    // Serializing a map of JSON values cannot fail
    let canonical = serde_json::to_string(options).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

type Slot = Arc<Mutex<Option<Arc<dyn CompiledTemplate>>>>;

#[derive(Debug, Default)]
struct CacheInner {
    entries: DashMap<CacheKey, Slot>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Memoized store of compiled templates.
///
/// Cloning a `TemplateCache` yields a handle to the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct TemplateCache {
    inner: Arc<CacheInner>,
}

impl TemplateCache {
    /// Create a new, isolated cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by renderers unless another one is supplied.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<TemplateCache> = OnceLock::new();
        GLOBAL.get_or_init(TemplateCache::new).clone()
    }

    /// Return the cached template for `key`, compiling it with `compile` on first use.
    ///
    /// `compile` runs at most once per key while it succeeds. Its errors are
    /// returned unchanged and leave the key uncached.
    pub fn get_or_compile<F>(&self, key: CacheKey, compile: F) -> Result<Arc<dyn CompiledTemplate>, ViewError>
    where
        F: FnOnce() -> Result<Arc<dyn CompiledTemplate>, ViewError>,
    {
        // Clone the slot out so the shard lock is released before compiling
        let slot: Slot = self.inner.entries.entry(key.clone()).or_default().clone();

        let mut guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(template) = guard.as_ref() {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Template cache hit for {}", key.path.display());
            return Ok(Arc::clone(template));
        }

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Compiling template {} ({})", key.path.display(), key.engine);

        let template = compile()?;
        *guard = Some(Arc::clone(&template));
        Ok(template)
    }

    /// Number of compiled templates currently stored.
    pub fn len(&self) -> usize {
        // Shard guards must be released before waiting on a slot that may be compiling
        let slots: Vec<Slot> = self.inner.entries.iter().map(|entry| Arc::clone(entry.value())).collect();

        slots
            .iter()
            .filter(|slot| slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).is_some())
            .count()
    }

    /// Whether no compiled template is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics as `(hits, misses)`.
    pub fn stats(&self) -> (usize, usize) {
        (self.inner.hits.load(Ordering::Relaxed), self.inner.misses.load(Ordering::Relaxed))
    }

    /// Calculate hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let (hits, misses) = self.stats();
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    /// Whether two handles share the same underlying store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
