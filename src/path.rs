//! Template search paths.
//!
//! A [`SearchPath`] is one root directory plus an optional logical prefix. It maps a
//! logical template name and a format to a concrete file, trying the format-specific
//! extension first and an engine-agnostic extension second:
//!
//! ```text
//! <root>/<prefix>/<name>.<format>.*    e.g. articles/show.html.tera
//! <root>/<prefix>/<name>.*             e.g. articles/show.tera
//! ```
//!
//! Absence is an expected outcome and is reported as `None`, never as an error.
//! Partial-name translation is the renderer's job; a search path resolves exactly
//! the name it is given.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One template root directory plus an optional logical prefix.
///
/// Search paths are immutable values: [`SearchPath::chdir`] returns a new path and
/// leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPath {
    root: PathBuf,
    prefix: Option<PathBuf>,
}

impl SearchPath {
    /// Create a search path rooted at `root` with no prefix.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            prefix: None,
        }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The logical prefix, if this path was derived with [`SearchPath::chdir`].
    pub fn prefix(&self) -> Option<&Path> {
        self.prefix.as_deref()
    }

    /// The directory templates are actually looked up in (`root` joined with the prefix).
    pub fn dir(&self) -> PathBuf {
        match &self.prefix {
            Some(prefix) => self.root.join(prefix),
            None => self.root.clone(),
        }
    }

    /// Derive a search path rooted in `dirname` below the current prefix.
    ///
    /// ```rust
    /// use vellum::SearchPath;
    /// use std::path::Path;
    ///
    /// let path = SearchPath::new("templates");
    /// let nested = path.chdir("admin").chdir("users");
    ///
    /// assert_eq!(nested.prefix(), Some(Path::new("admin/users")));
    /// assert_eq!(path.prefix(), None);
    /// ```
    #[must_use]
    pub fn chdir(&self, dirname: impl AsRef<Path>) -> Self {
        let prefix = match &self.prefix {
            Some(prefix) => prefix.join(dirname),
            None => dirname.as_ref().to_path_buf(),
        };

        Self {
            root: self.root.clone(),
            prefix: Some(prefix),
        }
    }

    /// Resolve a logical template name for `format` to an existing file.
    ///
    /// Candidates are tried in order: `<name>.<format>.*`, then `<name>.<ext>` with a
    /// single, engine-agnostic extension. Within a pattern, matches are taken in
    /// alphabetical order and the first regular file wins.
    pub fn lookup(&self, name: &str, format: &str) -> Option<PathBuf> {
        let base = self.dir().join(name);
        let escaped = glob::Pattern::escape(&base.to_string_lossy());

        let format_escaped = glob::Pattern::escape(format);

        if let Some(path) = first_file(&format!("{escaped}.{format_escaped}.*"), |_| true) {
            tracing::trace!("Resolved {} ({}) to {}", name, format, path.display());
            return Some(path);
        }

        let file_stem = base.file_name().map(|stem| stem.to_string_lossy().into_owned())?;
        let agnostic = first_file(&format!("{escaped}.*"), |path| {
            // `<name>.<other-format>.<ext>` belongs to another format
            path.file_name()
                .and_then(|file_name| file_name.to_str())
                .and_then(|file_name| file_name.strip_prefix(&file_stem))
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|extension| !extension.is_empty() && !extension.contains('.'))
        });

        match &agnostic {
            Some(path) => tracing::trace!("Resolved {} to {}", name, path.display()),
            None => tracing::trace!("No template for {} ({}) in {}", name, format, self),
        }
        agnostic
    }

    /// List the logical names of every template below this path's directory.
    pub fn templates(&self) -> Vec<String> {
        available_templates(&self.dir())
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir().display())
    }
}

fn first_file(pattern: &str, accept: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!("Invalid template lookup pattern {}: {}", pattern, e);
            return None;
        }
    };

    paths.filter_map(Result::ok).find(|path| path.is_file() && accept(path))
}

/// List logical template names found below `root`.
///
/// A logical name is the file's path relative to `root`, using `/` as delimiter,
/// with every extension removed (`articles/show.html.tera` -> `articles/show`).
/// Missing or unreadable roots yield an empty list.
pub fn available_templates(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            let segments: Vec<String> = relative
                .iter()
                .map(|segment| segment.to_string_lossy().into_owned())
                .collect();
            let (file_name, dirs) = segments.split_last()?;
            let stem = file_name.split('.').next().filter(|stem| !stem.is_empty())?;

            let mut name = dirs.join("/");
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(stem);
            Some(name)
        })
        .collect();

    names.sort();
    names.dedup();
    names
}
