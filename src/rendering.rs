//! The rendering context shared by a tree of parts.
//!
//! A [`Rendering`] bundles the [`Renderer`], the [`Inflector`], the context globals and
//! the [`PartBuilder`] used for one top-level render. Parts hold it behind an `Arc` and
//! pass the very same `Arc` to every part they decorate; it is never copied or rebuilt
//! per sub-part.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::constants::CONTEXT_SCOPE_KEY;
use crate::core::ViewError;
use crate::inflector::{DefaultInflector, Inflector};
use crate::part::{DefaultPartBuilder, Part, PartBuilder, PartClass};
use crate::renderer::Renderer;

/// Collaborators shared by every part produced from one render.
#[derive(Clone)]
pub struct Rendering {
    renderer: Renderer,
    inflector: Arc<dyn Inflector>,
    context: Value,
    part_builder: Arc<dyn PartBuilder>,
}

impl Rendering {
    /// Create a rendering context with the default inflector and part builder and no
    /// context globals.
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            inflector: Arc::new(DefaultInflector::new()),
            context: Value::Object(Map::new()),
            part_builder: Arc::new(DefaultPartBuilder::new()),
        }
    }

    /// Replace the inflector.
    #[must_use]
    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.inflector = inflector;
        self
    }

    /// Replace the context globals, exposed to templates as `context`.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Replace the part builder.
    #[must_use]
    pub fn with_part_builder(mut self, part_builder: Arc<dyn PartBuilder>) -> Self {
        self.part_builder = part_builder;
        self
    }

    /// The renderer.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The inflector.
    pub fn inflector(&self) -> &dyn Inflector {
        self.inflector.as_ref()
    }

    /// The context globals.
    pub fn context(&self) -> &Value {
        &self.context
    }

    /// The part builder.
    pub fn part_builder(&self) -> &dyn PartBuilder {
        self.part_builder.as_ref()
    }

    /// Build a part for `value` through the part builder.
    pub fn part(self: &Arc<Self>, name: &str, value: Value) -> Part {
        self.part_builder.build_part(name, value, self, None)
    }

    /// Build a part of an explicit `class` for `value`.
    pub fn part_of(self: &Arc<Self>, class: Arc<PartClass>, name: &str, value: Value) -> Part {
        self.part_builder.build_part(name, value, self, Some(class))
    }

    /// Derive a rendering context whose renderer is rebased into `dirname`.
    ///
    /// Inflector, context globals and part builder are shared with the receiver.
    #[must_use]
    pub fn chdir(&self, dirname: impl AsRef<Path>) -> Self {
        Self {
            renderer: self.renderer.chdir(dirname),
            inflector: Arc::clone(&self.inflector),
            context: self.context.clone(),
            part_builder: Arc::clone(&self.part_builder),
        }
    }

    /// Build a template scope from `locals`, adding the context globals as `context`
    /// unless a local of that name already exists.
    pub fn scope(&self, mut locals: Map<String, Value>) -> Value {
        if !locals.contains_key(CONTEXT_SCOPE_KEY) {
            locals.insert(CONTEXT_SCOPE_KEY.to_string(), self.context.clone());
        }
        Value::Object(locals)
    }

    /// Render the template `name` with `locals` in scope.
    pub fn template(&self, name: &str, locals: Map<String, Value>) -> Result<String, ViewError> {
        self.renderer.template(name, &self.scope(locals), None)
    }

    /// Render the partial `name` with `locals` in scope.
    pub fn partial(&self, name: &str, locals: Map<String, Value>) -> Result<String, ViewError> {
        self.renderer.partial(name, &self.scope(locals), None)
    }
}

impl fmt::Debug for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendering")
            .field("renderer", &self.renderer)
            .field("inflector", &self.inflector)
            .field("context", &self.context)
            .field("part_builder", &self.part_builder)
            .finish()
    }
}
