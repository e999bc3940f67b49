//! Global constants used throughout the vellum codebase.
//!
//! Naming conventions for templates and partials, default formats and the
//! configuration file name live here so that the path resolver, renderer and
//! CLI agree on them.

/// Marker prepended to the final segment of a logical name to address a partial.
///
/// `"articles/comment"` is looked up as `"articles/_comment"`.
pub const PARTIAL_PREFIX: &str = "_";

/// Delimiter between segments of a logical template name.
///
/// Logical names always use forward slashes regardless of platform.
pub const PATH_DELIMITER: &str = "/";

/// Format used when neither the caller nor the configuration names one.
pub const DEFAULT_FORMAT: &str = "html";

/// Name of the project configuration file looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "vellum.toml";

/// Suffix appended to a camelized name when resolving part classes by convention.
///
/// The name `comment` resolves to the class registered as `CommentPart`.
pub const PART_CLASS_SUFFIX: &str = "Part";

/// Name of the default part class every unresolved name falls back to.
pub const DEFAULT_PART_CLASS: &str = "Part";

/// Scope key under which the rendering context globals are exposed to templates.
pub const CONTEXT_SCOPE_KEY: &str = "context";

/// Maximum number of "did you mean" suggestions attached to a missing template error.
pub const MAX_TEMPLATE_SUGGESTIONS: usize = 3;

/// Maximum Levenshtein distance, as a percentage of the requested name length,
/// for a template file to be suggested as an alternative.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
