//! Part construction strategies.
//!
//! A [`PartBuilder`] decides which [`PartClass`] wraps a named value. Resolution order:
//!
//! 1. An explicit class override (from a [`Decoration`](super::Decoration) or the caller)
//! 2. The builder's own [`PartBuilder::part_class`] resolution
//! 3. The default class, [`PartClass::base`]
//!
//! Resolution never fails: a name with no matching class falls back to the default.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Part, PartClass};
use crate::constants::PART_CLASS_SUFFIX;
use crate::rendering::Rendering;

/// Strategy for turning `(name, value)` pairs into parts.
pub trait PartBuilder: Send + Sync + fmt::Debug {
    /// Resolve the class used for values named `name`.
    ///
    /// The default implementation always returns [`PartClass::base`].
    fn part_class(&self, name: &str, rendering: &Rendering) -> Arc<PartClass> {
        let _ = (name, rendering);
        PartClass::base()
    }

    /// Build a part named `name` wrapping `value`.
    ///
    /// `class` takes precedence over [`PartBuilder::part_class`]. The part shares
    /// `rendering` with its caller.
    fn build_part(
        &self,
        name: &str,
        value: Value,
        rendering: &Arc<Rendering>,
        class: Option<Arc<PartClass>>,
    ) -> Part {
        let class = class.unwrap_or_else(|| self.part_class(name, rendering));
        tracing::trace!("Building {} for {}", class.name(), name);
        Part::with_class(class, name, value, Arc::clone(rendering))
    }
}

/// Builder that wraps every value in the default part class unless overridden.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPartBuilder;

impl DefaultPartBuilder {
    /// Create the default part builder.
    pub fn new() -> Self {
        Self
    }
}

impl PartBuilder for DefaultPartBuilder {}

/// Builder resolving classes by naming convention from a registry.
///
/// The name is camelized with the rendering's inflector and suffixed with `Part`:
/// values named `comment` are built as the class registered as `CommentPart`.
/// Unregistered names use the default class.
///
/// ```rust
/// use std::sync::Arc;
/// use serde_json::json;
/// use vellum::{PartClass, RegistryPartBuilder, Renderer, Rendering};
///
/// let builder = RegistryPartBuilder::new()
///     .register(PartClass::builder("CommentPart").build());
///
/// let rendering = Arc::new(Rendering::new(Renderer::new(vec![], "html")).with_part_builder(Arc::new(builder)));
///
/// assert_eq!(rendering.part("comment", json!({})).class_name(), "CommentPart");
/// assert_eq!(rendering.part("author", json!({})).class_name(), "Part");
/// ```
#[derive(Default)]
pub struct RegistryPartBuilder {
    classes: HashMap<String, Arc<PartClass>>,
}

impl RegistryPartBuilder {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `class` under its own name.
    #[must_use]
    pub fn register(mut self, class: Arc<PartClass>) -> Self {
        self.classes.insert(class.name().to_string(), class);
        self
    }

    /// Look up a registered class by its exact name.
    pub fn get(&self, class_name: &str) -> Option<&Arc<PartClass>> {
        self.classes.get(class_name)
    }
}

impl PartBuilder for RegistryPartBuilder {
    fn part_class(&self, name: &str, rendering: &Rendering) -> Arc<PartClass> {
        let class_name = format!("{}{PART_CLASS_SUFFIX}", rendering.inflector().camelize(name));

        match self.classes.get(&class_name) {
            Some(class) => Arc::clone(class),
            None => {
                tracing::trace!("No part class {} registered, using default", class_name);
                PartClass::base()
            }
        }
    }
}

impl fmt::Debug for RegistryPartBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.classes.keys().collect();
        names.sort();
        f.debug_struct("RegistryPartBuilder").field("classes", &names).finish()
    }
}
