//! View parts: presentation wrappers around rendered data.
//!
//! A [`Part`] wraps a value together with the shared [`Rendering`] context. Its
//! [`PartClass`] declares which attributes are decorated: reading such an attribute
//! through [`Part::attr`] wraps it in another part (or a list of parts for sequences)
//! built by the rendering's [`PartBuilder`].
//!
//! # Decoration rules
//!
//! - Decoration is lazy and memoized: an attribute is decorated on first access.
//! - Falsy values (`null`, `false`, `""`, `[]`, `{}`) are returned unchanged, never
//!   wrapped. Missing attributes return `None`.
//! - Sequences are decorated element by element, preserving order and count. Each
//!   element is built with the singular form of the attribute name, so the elements of
//!   `comments` are `comment` parts.
//! - Every decorated part shares the parent's `Arc<Rendering>`.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use vellum::{Attr, PartClass, Renderer, Rendering};
//!
//! let rendering = Arc::new(Rendering::new(Renderer::new(vec![], "html")));
//! let article_class = PartClass::builder("ArticlePart").decorate(["author", "comments"]).build();
//!
//! let article = rendering.part_of(
//!     article_class,
//!     "article",
//!     json!({
//!         "title": "Hello world",
//!         "author": { "name": "Jane Doe" },
//!         "comments": [{ "body": "Great article" }],
//!     }),
//! );
//!
//! assert!(matches!(article.attr("author"), Some(Attr::Part(_))));
//! assert_eq!(article.parts("comments").map(<[_]>::len), Some(1));
//! assert!(matches!(article.attr("title"), Some(Attr::Value(_))));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::core::ViewError;
use crate::rendering::Rendering;

pub mod builder;
pub mod class;

pub use builder::{DefaultPartBuilder, PartBuilder, RegistryPartBuilder};
pub use class::{Decoration, Helper, PartClass, PartClassBuilder};

/// Result of decorating one attribute.
#[derive(Debug, Clone)]
enum Decorated {
    One(Box<Part>),
    Many(Vec<Part>),
}

/// An attribute read through a part.
#[derive(Debug, Clone, Copy)]
pub enum Attr<'a> {
    /// Raw value: an undecorated attribute, or a decorated attribute holding a falsy value.
    Value(&'a Value),
    /// A decorated single value.
    Part(&'a Part),
    /// A decorated sequence, one part per element.
    Parts(&'a [Part]),
}

impl<'a> Attr<'a> {
    /// The raw value, if this attribute was not wrapped.
    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Attr::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The single part, if this attribute was decorated as one value.
    pub fn as_part(&self) -> Option<&'a Part> {
        match self {
            Attr::Part(part) => Some(part),
            _ => None,
        }
    }

    /// The parts, if this attribute was decorated as a sequence.
    pub fn as_parts(&self) -> Option<&'a [Part]> {
        match self {
            Attr::Parts(parts) => Some(parts),
            _ => None,
        }
    }
}

/// Whether `value` is passed through decoration unchanged.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// A value wrapped with presentation behaviour and the shared rendering context.
#[derive(Clone)]
pub struct Part {
    name: String,
    value: Value,
    class: Arc<PartClass>,
    rendering: Arc<Rendering>,
    locals: Map<String, Value>,
    decorated: BTreeMap<String, OnceLock<Option<Decorated>>>,
}

impl Part {
    /// Wrap `value` in the default part class.
    pub fn new(name: impl Into<String>, value: Value, rendering: Arc<Rendering>) -> Self {
        Self::with_class(PartClass::base(), name, value, rendering)
    }

    /// Wrap `value` in `class`.
    pub fn with_class(
        class: Arc<PartClass>,
        name: impl Into<String>,
        value: Value,
        rendering: Arc<Rendering>,
    ) -> Self {
        let decorated =
            class.decorated_attributes().map(|attribute| (attribute.to_string(), OnceLock::new())).collect();

        Self {
            name: name.into(),
            value,
            class,
            rendering,
            locals: Map::new(),
            decorated,
        }
    }

    /// Attach extra locals passed to every partial this part renders.
    #[must_use]
    pub fn with_locals(mut self, locals: Map<String, Value>) -> Self {
        self.locals = locals;
        self
    }

    /// Symbolic name, e.g. `article`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The part's class.
    pub fn class(&self) -> &Arc<PartClass> {
        &self.class
    }

    /// Name of the part's class, e.g. `ArticlePart`.
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// The shared rendering context.
    pub fn rendering(&self) -> &Arc<Rendering> {
        &self.rendering
    }

    /// Extra locals attached with [`Part::with_locals`].
    pub fn locals(&self) -> &Map<String, Value> {
        &self.locals
    }

    /// Read an attribute of the wrapped value, decorating it when declared.
    ///
    /// Returns `None` when the wrapped value has no such attribute.
    pub fn attr(&self, name: &str) -> Option<Attr<'_>> {
        let raw = self.value.get(name)?;

        let Some(slot) = self.decorated.get(name) else {
            return Some(Attr::Value(raw));
        };

        let attr = match slot.get_or_init(|| self.decorate_attribute(name, raw)) {
            Some(Decorated::One(part)) => Attr::Part(part),
            Some(Decorated::Many(parts)) => Attr::Parts(parts),
            None => Attr::Value(raw),
        };
        Some(attr)
    }

    /// Shorthand for an attribute decorated as a single part.
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.attr(name).and_then(|attr| attr.as_part())
    }

    /// Shorthand for an attribute decorated as a sequence of parts.
    pub fn parts(&self, name: &str) -> Option<&[Part]> {
        self.attr(name).and_then(|attr| attr.as_parts())
    }

    /// Render the partial `name` with this part in scope under its own name.
    pub fn render(&self, name: &str) -> Result<String, ViewError> {
        self.render_with(name, Map::new())
    }

    /// Render the partial `name` with this part and additional `locals` in scope.
    ///
    /// Scope precedence, lowest first: the part's own locals, the part under its
    /// name, `locals`. Rendering context globals are exposed as `context`.
    pub fn render_with(&self, name: &str, locals: Map<String, Value>) -> Result<String, ViewError> {
        let mut scope = self.locals.clone();
        scope.insert(self.name.clone(), serde_json::to_value(self)?);
        scope.extend(locals);

        self.rendering.partial(name, scope)
    }

    fn decorate_attribute(&self, name: &str, raw: &Value) -> Option<Decorated> {
        if is_falsy(raw) {
            tracing::trace!("Not decorating falsy attribute {}.{}", self.name, name);
            return None;
        }

        let rule = self.class.decoration(name)?;
        let class = rule.class_override().cloned();
        let builder = self.rendering.part_builder();

        let element_wise = rule.array_hint().unwrap_or_else(|| raw.is_array());
        if !element_wise {
            let part = builder.build_part(name, raw.clone(), &self.rendering, class);
            return Some(Decorated::One(Box::new(part)));
        }

        let item_name = self.rendering.inflector().singularize(name);
        let items = match raw {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        };

        tracing::trace!("Decorating {} element(s) of {}.{} as {}", items.len(), self.name, name, item_name);

        let parts = items
            .into_iter()
            .map(|item| builder.build_part(&item_name, item, &self.rendering, class.clone()))
            .collect();
        Some(Decorated::Many(parts))
    }
}

impl Serialize for Part {
    /// Serialize the wrapped value with decorated attributes replaced by their parts
    /// and class helpers merged in. Helpers shadow fields of the same name.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Value::Object(fields) = &self.value else {
            return self.value.serialize(serializer);
        };

        let helpers = self.class.helpers();
        let mut map = serializer.serialize_map(None)?;

        for (key, raw) in fields {
            if helpers.contains_key(key) {
                continue;
            }
            match self.attr(key) {
                Some(Attr::Part(part)) => map.serialize_entry(key, part)?,
                Some(Attr::Parts(parts)) => map.serialize_entry(key, parts)?,
                _ => map.serialize_entry(key, raw)?,
            }
        }

        for (name, helper) in helpers {
            map.serialize_entry(name, &helper(self))?;
        }

        map.end()
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => f.write_str(s),
            Value::Null => Ok(()),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("name", &self.name)
            .field("class", &self.class.name())
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
