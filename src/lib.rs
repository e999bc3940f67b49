//! vellum - template resolution, rendering and view-part decoration
//!
//! vellum resolves logical template names (`articles/show`) to files across an
//! ordered list of search paths, renders them through a pluggable template engine
//! and wraps the data handed to templates in *parts*: presentation objects that can
//! decorate their own attributes as further parts.
//!
//! # Architecture Overview
//!
//! - A [`Renderer`] owns search paths, a target format and engine options. It finds
//!   `<name>.<format>.<ext>` (or `<name>.<ext>`) in the first search path that has it,
//!   compiles the file once per `(engine, path, options)` through the
//!   [`TemplateCache`] and renders it against a serializable scope.
//! - A [`Rendering`] bundles the renderer with an [`Inflector`], context globals and
//!   a [`PartBuilder`]. It is shared by every part built during one render.
//! - A [`Part`] wraps a JSON value. Its [`PartClass`] declares decorated attributes;
//!   reading one yields a nested part, or one part per element for sequences.
//!
//! # Core Modules
//!
//! - [`path`] - Search roots and file lookup
//! - [`renderer`] - Name resolution, partials and the compiled-template cache
//! - [`engine`] - Template engine contract and the Tera adapter
//! - [`part`] - Parts, part classes and part builders
//! - [`rendering`] - The shared rendering context
//! - [`inflector`] - Singularization and camelization of attribute names
//! - [`config`] - `vellum.toml` loading
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `vellum` command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use vellum::{PartClass, RegistryPartBuilder, Renderer, Rendering, SearchPath};
//!
//! # fn example() -> Result<(), vellum::ViewError> {
//! let builder = RegistryPartBuilder::new()
//!     .register(PartClass::builder("ArticlePart").decorate(["author", "comments"]).build());
//!
//! let renderer = Renderer::new(vec![SearchPath::new("templates")], "html");
//! let rendering = Arc::new(Rendering::new(renderer).with_part_builder(Arc::new(builder)));
//!
//! let article = rendering.part(
//!     "article",
//!     json!({ "title": "Hello", "author": { "name": "Jane" }, "comments": [] }),
//! );
//!
//! // templates/articles/_summary.html.tera sees `article` and `context`
//! let html = article.render("articles/summary")?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod engine;
pub mod inflector;
pub mod part;
pub mod path;
pub mod renderer;
pub mod rendering;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ViewConfig;
pub use core::{ErrorContext, ViewError};
pub use engine::{Block, CompiledTemplate, RenderOptions, TemplateEngine, TeraEngine};
pub use inflector::{DefaultInflector, Inflector};
pub use part::{
    Attr, Decoration, DefaultPartBuilder, Part, PartBuilder, PartClass, PartClassBuilder,
    RegistryPartBuilder,
};
pub use path::SearchPath;
pub use renderer::{Renderer, TemplateCache};
pub use rendering::Rendering;
