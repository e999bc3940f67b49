//! Part classes: per-type decoration rules and presentation helpers.
//!
//! A [`PartClass`] is the runtime description of a kind of part. It declares, once,
//! which attributes of the wrapped value are decorated into further parts and how,
//! plus any helpers that add presentation values to the part's serialized form.
//! Classes are built with [`PartClass::builder`] and shared behind an `Arc`.
//!
//! ```rust
//! use serde_json::json;
//! use vellum::{Decoration, PartClass};
//!
//! let author = PartClass::builder("AuthorPart")
//!     .helper("display_name", |part| json!(format!("by {}", part.value()["name"].as_str().unwrap_or("anonymous"))))
//!     .build();
//!
//! let article = PartClass::builder("ArticlePart")
//!     .decorate_with(["author"], Decoration::new().as_class(author))
//!     .decorate(["comments"])
//!     .build();
//!
//! assert!(article.decoration("author").is_some());
//! assert!(article.decoration("title").is_none());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::Part;
use crate::constants::DEFAULT_PART_CLASS;

/// Presentation helper evaluated against a part when it is serialized.
pub type Helper = Arc<dyn Fn(&Part) -> Value + Send + Sync>;

/// How a declared attribute is decorated.
#[derive(Clone, Default)]
pub struct Decoration {
    as_class: Option<Arc<PartClass>>,
    array: Option<bool>,
}

impl Decoration {
    /// Decoration with no class override and runtime-shape array detection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always build parts of `class`, bypassing the part builder's class resolution.
    #[must_use]
    pub fn as_class(mut self, class: Arc<PartClass>) -> Self {
        self.as_class = Some(class);
        self
    }

    /// Force (`true`) or suppress (`false`) element-wise decoration.
    ///
    /// Without a hint, sequences are decorated element-wise and everything else as a
    /// single part. With `true`, a non-sequence value is treated as a one-element
    /// sequence; with `false`, a sequence is wrapped in a single part.
    #[must_use]
    pub fn array(mut self, array: bool) -> Self {
        self.array = Some(array);
        self
    }

    /// The class override, if any.
    pub fn class_override(&self) -> Option<&Arc<PartClass>> {
        self.as_class.as_ref()
    }

    /// The explicit array hint, if any.
    pub fn array_hint(&self) -> Option<bool> {
        self.array
    }
}

impl fmt::Debug for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoration")
            .field("as_class", &self.as_class.as_ref().map(|class| class.name()))
            .field("array", &self.array)
            .finish()
    }
}

/// Runtime description of a kind of part.
pub struct PartClass {
    name: String,
    decorations: BTreeMap<String, Decoration>,
    helpers: BTreeMap<String, Helper>,
}

impl PartClass {
    /// Start building a class named `name`.
    pub fn builder(name: impl Into<String>) -> PartClassBuilder {
        PartClassBuilder {
            class: PartClass {
                name: name.into(),
                decorations: BTreeMap::new(),
                helpers: BTreeMap::new(),
            },
        }
    }

    /// The default part class: no decorations, no helpers.
    pub fn base() -> Arc<PartClass> {
        static BASE: OnceLock<Arc<PartClass>> = OnceLock::new();
        Arc::clone(BASE.get_or_init(|| PartClass::builder(DEFAULT_PART_CLASS).build()))
    }

    /// Class name, e.g. `ArticlePart`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoration rule declared for `attribute`.
    pub fn decoration(&self, attribute: &str) -> Option<&Decoration> {
        self.decorations.get(attribute)
    }

    /// Names of every decorated attribute, in sorted order.
    pub fn decorated_attributes(&self) -> impl Iterator<Item = &str> {
        self.decorations.keys().map(String::as_str)
    }

    /// Presentation helpers by name.
    pub fn helpers(&self) -> &BTreeMap<String, Helper> {
        &self.helpers
    }
}

impl fmt::Debug for PartClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartClass")
            .field("name", &self.name)
            .field("decorations", &self.decorations)
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`PartClass`].
///
/// `decorate(["a", "b"])` and `decorate(["a"]).decorate(["b"])` declare the same rules.
/// A later declaration for the same attribute replaces the earlier one.
pub struct PartClassBuilder {
    class: PartClass,
}

impl PartClassBuilder {
    /// Decorate each listed attribute with the default rule.
    #[must_use]
    pub fn decorate<I, S>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decorate_with(attributes, Decoration::new())
    }

    /// Decorate each listed attribute with `decoration`.
    #[must_use]
    pub fn decorate_with<I, S>(mut self, attributes: I, decoration: Decoration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for attribute in attributes {
            self.class.decorations.insert(attribute.into(), decoration.clone());
        }
        self
    }

    /// Add a presentation helper exposed under `name` when the part is serialized.
    #[must_use]
    pub fn helper<F>(mut self, name: impl Into<String>, helper: F) -> Self
    where
        F: Fn(&Part) -> Value + Send + Sync + 'static,
    {
        self.class.helpers.insert(name.into(), Arc::new(helper));
        self
    }

    /// Finish the class.
    pub fn build(self) -> Arc<PartClass> {
        Arc::new(self.class)
    }
}
