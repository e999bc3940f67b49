//! Name inflection used by part naming conventions.
//!
//! Parts built for the elements of a collection attribute are named with the
//! singular form of the attribute (`comments` -> `comment`), and convention-based
//! part class lookup camelizes names (`blog_post` -> `BlogPost`). Both operations are
//! supplied by an [`Inflector`] carried in the rendering context, so applications can
//! plug in a full inflection library.

use heck::ToUpperCamelCase;

/// Singularization and camel-casing of symbolic names.
pub trait Inflector: Send + Sync + std::fmt::Debug {
    /// Singular form of an English plural noun.
    fn singularize(&self, word: &str) -> String;

    /// `snake_case`, `kebab-case` or `path/like` names to `CamelCase`.
    fn camelize(&self, word: &str) -> String;
}

/// Whole-word plurals whose singular no suffix rule produces.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("lives", "life"),
    ("wives", "wife"),
    ("movies", "movie"),
    ("pies", "pie"),
    ("ties", "tie"),
    ("lies", "lie"),
    ("toes", "toe"),
    ("foes", "foe"),
    ("hoes", "hoe"),
    ("uses", "use"),
    ("abuses", "abuse"),
    ("excuses", "excuse"),
    ("fuses", "fuse"),
    ("muses", "muse"),
    ("ruses", "ruse"),
    ("crises", "crisis"),
    ("theses", "thesis"),
];

const UNCOUNTABLE: &[&str] =
    &["equipment", "information", "rice", "money", "species", "series", "fish", "sheep", "news"];

/// Plural suffix rules, first match wins. The stem before the suffix is kept.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("quizzes", "quiz"),
    ("zzes", "zz"),
    ("alyses", "alysis"),
    ("gnoses", "gnosis"),
    ("ntheses", "nthesis"),
    ("potheses", "pothesis"),
    ("nopses", "nopsis"),
    ("shoes", "shoe"),
    ("canoes", "canoe"),
    ("oboes", "oboe"),
    ("oes", "o"),
    ("ouses", "ouse"),
    ("auses", "ause"),
    ("uses", "us"),
    ("lves", "lf"),
    ("eaves", "eaf"),
    ("oaves", "oaf"),
    ("ieves", "ief"),
    ("arves", "arf"),
    ("ies", "y"),
    ("sses", "ss"),
    ("shes", "sh"),
    ("ches", "ch"),
    ("xes", "x"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
];

/// Inflector covering regular English plurals and a small set of irregular words.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInflector;

impl DefaultInflector {
    /// Create the default inflector.
    pub fn new() -> Self {
        Self
    }
}

impl Inflector for DefaultInflector {
    fn singularize(&self, word: &str) -> String {
        // Only the last snake_case segment is inflected: `blog_posts` -> `blog_post`
        let (head, last) = match word.rfind('_') {
            Some(index) => word.split_at(index + 1),
            None => ("", word),
        };

        format!("{head}{}", singularize_word(last))
    }

    fn camelize(&self, word: &str) -> String {
        word.to_upper_camel_case()
    }
}

fn singularize_word(word: &str) -> String {
    if !word.is_ascii() {
        return word.to_string();
    }

    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return restore_case(word, singular);
    }

    SUFFIX_RULES
        .iter()
        .find(|(suffix, replacement)| {
            lower.ends_with(suffix) && (lower.len() > suffix.len() || !replacement.is_empty())
        })
        .map_or_else(
            || word.to_string(),
            |(suffix, replacement)| format!("{}{replacement}", &word[..word.len() - suffix.len()]),
        )
}

fn restore_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
