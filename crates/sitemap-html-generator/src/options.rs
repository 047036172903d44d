//! Sitemap options and their resolution from user configuration.
//!
//! User input is deserialized leniently and merged key by key over
//! [`SitemapOptions::default`]. Nothing here fails: unusable values keep
//! their default and produce a warning.

use std::{collections::BTreeMap, fmt};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{LOG_TARGET, template::Layout};

/// Default output path, relative to the public directory.
pub const DEFAULT_PATH: &str = "sitemap.html";

/// Which content sections are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub posts: bool,
    pub categories: bool,
    pub pages: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            posts: true,
            categories: true,
            pages: true,
        }
    }
}

/// Fully resolved sitemap options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapOptions {
    /// Output path under the public directory.
    pub path: String,

    /// Enabled sections.
    pub enable: Sections,

    /// Substrings that exclude a page when found in its title or path.
    pub exclude: Vec<String>,

    /// Visual layout.
    pub layout: Layout,

    /// Add `rel="nofollow"` to item links.
    pub nofollow: bool,
}

impl Default for SitemapOptions {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
            enable: Sections::default(),
            exclude: Vec::new(),
            layout: Layout::default(),
            nofollow: false,
        }
    }
}

/// A problem found while resolving user options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionWarning {
    /// The layout id is not a known layout.
    UnknownLayout(String),

    /// A value has the wrong shape and was replaced by its default.
    Malformed {
        key: String,
        expected: &'static str,
    },
}

impl fmt::Display for OptionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLayout(id) => write!(
                f,
                "invalid layout: {id}, fallback to {}",
                Layout::default()
            ),
            Self::Malformed { key, expected } => {
                write!(f, "invalid value for {key}: expected {expected}, using default")
            }
        }
    }
}

/// Resolved options together with the warnings logged while resolving them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub options: SitemapOptions,
    pub warnings: Vec<OptionWarning>,
}

impl SitemapOptions {
    /// Merge user configuration over the defaults.
    ///
    /// Every warning is logged once and returned in the [`Resolution`].
    #[must_use]
    pub fn resolve(user: Option<&toml::Value>) -> Resolution {
        let mut options = Self::default();
        let mut warnings = Vec::new();

        let raw = user
            .filter(|value| value.is_table())
            .map(|value| value.clone().try_into::<RawOptions>());

        match raw {
            None if user.is_none() => {}
            Some(Ok(raw)) => options.merge(raw, &mut warnings),
            _ => warnings.push(malformed("html_sitemap", "a table")),
        }

        for warning in &warnings {
            warn!(target: LOG_TARGET, "{warning}");
        }

        Resolution { options, warnings }
    }

    fn merge(&mut self, raw: RawOptions, warnings: &mut Vec<OptionWarning>) {
        match raw.path {
            Some(Field::Valid(path)) if !path.trim().is_empty() => {
                self.path = path.trim().to_string();
            }
            Some(_) => warnings.push(malformed("path", "a non-empty string")),
            None => {}
        }

        match raw.enable {
            Some(Field::Valid(sections)) => self.enable.merge(sections, warnings),
            Some(Field::Invalid(_)) => warnings.push(malformed("enable", "a table of booleans")),
            None => {}
        }

        match raw.exclude {
            Some(Field::Valid(Patterns::One(pattern))) => self.exclude = vec![pattern],
            Some(Field::Valid(Patterns::Many(items))) => {
                let total = items.len();
                self.exclude = items.into_iter().filter_map(Field::valid).collect();
                if self.exclude.len() != total {
                    warnings.push(malformed("exclude", "a list of strings"));
                }
            }
            Some(Field::Invalid(_)) => warnings.push(malformed("exclude", "a list of strings")),
            None => {}
        }

        if let Some(layout) = raw.layout {
            let id = match layout {
                Field::Valid(id) => id,
                Field::Invalid(other) => other.to_string(),
            };
            match Layout::from_id(&id) {
                Some(layout) => self.layout = layout,
                None => warnings.push(OptionWarning::UnknownLayout(id)),
            }
        }

        merge_flag(&mut self.nofollow, raw.nofollow, "nofollow", warnings);

        for key in raw.unknown.keys() {
            debug!(key = %key, "ignoring unknown html_sitemap key");
        }
    }
}

impl Sections {
    fn merge(&mut self, raw: RawSections, warnings: &mut Vec<OptionWarning>) {
        merge_flag(&mut self.posts, raw.posts, "enable.posts", warnings);
        merge_flag(&mut self.categories, raw.categories, "enable.categories", warnings);
        merge_flag(&mut self.pages, raw.pages, "enable.pages", warnings);

        for section in raw.unknown.keys() {
            debug!(section = %section, "ignoring unknown section");
        }
    }
}

/// The `[html_sitemap]` table as written by the user.
#[derive(Debug, Deserialize)]
struct RawOptions {
    path: Option<Field<String>>,
    enable: Option<Field<RawSections>>,
    exclude: Option<Field<Patterns>>,
    layout: Option<Field<String>>,
    nofollow: Option<Field<Flag>>,
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawSections {
    posts: Option<Field<Flag>>,
    categories: Option<Field<Flag>>,
    pages: Option<Field<Flag>>,
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// A value of the expected shape, or whatever was found instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Field<T> {
    Valid(T),
    Invalid(toml::Value),
}

impl<T> Field<T> {
    fn valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

/// Exclusion patterns: a single string or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Patterns {
    One(String),
    Many(Vec<Field<String>>),
}

/// A boolean, also accepting the strings "true" and "false" that
/// environment overrides produce.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "FlagRepr")]
struct Flag(bool);

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Text(String),
}

impl TryFrom<FlagRepr> for Flag {
    type Error = String;

    fn try_from(repr: FlagRepr) -> Result<Self, Self::Error> {
        match repr {
            FlagRepr::Bool(flag) => Ok(Self(flag)),
            FlagRepr::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Self(true)),
                "false" => Ok(Self(false)),
                _ => Err(format!("not a boolean: {text}")),
            },
        }
    }
}

fn merge_flag(
    slot: &mut bool,
    field: Option<Field<Flag>>,
    key: &str,
    warnings: &mut Vec<OptionWarning>,
) {
    match field {
        Some(Field::Valid(Flag(flag))) => *slot = flag,
        Some(Field::Invalid(_)) => warnings.push(malformed(key, "a boolean")),
        None => {}
    }
}

fn malformed(key: &str, expected: &'static str) -> OptionWarning {
    OptionWarning::Malformed {
        key: key.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(toml_src: &str) -> toml::Value {
        toml::from_str(toml_src).expect("valid toml")
    }

    #[test]
    fn test_absent_config_gives_defaults() {
        let resolution = SitemapOptions::resolve(None);

        assert_eq!(resolution.options, SitemapOptions::default());
        assert!(resolution.warnings.is_empty());
        assert_eq!(resolution.options.path, "sitemap.html");
        assert!(resolution.options.enable.posts);
        assert!(resolution.options.enable.categories);
        assert!(resolution.options.enable.pages);
        assert!(resolution.options.exclude.is_empty());
        assert_eq!(resolution.options.layout, Layout::Flat);
        assert!(!resolution.options.nofollow);
    }

    #[test]
    fn test_full_override() {
        let value = user(
            r#"
path = "map/index.html"
exclude = ["Draft", "/private"]
layout = "rich"
nofollow = true

[enable]
posts = false
categories = false
pages = false
"#,
        );

        let resolution = SitemapOptions::resolve(Some(&value));
        let options = resolution.options;

        assert!(resolution.warnings.is_empty());
        assert_eq!(options.path, "map/index.html");
        assert_eq!(options.exclude, vec!["Draft", "/private"]);
        assert_eq!(options.layout, Layout::Rich);
        assert!(options.nofollow);
        assert_eq!(
            options.enable,
            Sections {
                posts: false,
                categories: false,
                pages: false
            }
        );
    }

    #[test]
    fn test_partial_enable_merges_deeply() {
        let value = user(
            r#"
[enable]
categories = false
"#,
        );

        let options = SitemapOptions::resolve(Some(&value)).options;

        assert!(options.enable.posts);
        assert!(!options.enable.categories);
        assert!(options.enable.pages);
    }

    #[test]
    fn test_invalid_layout_warns_once() {
        let value = user(r#"layout = "doesnotexist""#);

        let resolution = SitemapOptions::resolve(Some(&value));

        assert_eq!(resolution.options.layout, Layout::default());
        assert_eq!(
            resolution.warnings,
            vec![OptionWarning::UnknownLayout("doesnotexist".to_string())]
        );
        assert!(resolution.warnings[0].to_string().contains("fallback to flat"));
    }

    #[test]
    fn test_non_string_layout_is_unknown() {
        let value = user("layout = 3");
        let resolution = SitemapOptions::resolve(Some(&value));
        assert_eq!(resolution.options.layout, Layout::default());
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_layout_is_case_insensitive() {
        let value = user(r#"layout = "Modern""#);
        assert_eq!(
            SitemapOptions::resolve(Some(&value)).options.layout,
            Layout::Modern
        );
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let value = user(
            r#"
path = ""
enable = true
nofollow = "maybe"
exclude = 7
"#,
        );

        let resolution = SitemapOptions::resolve(Some(&value));

        assert_eq!(resolution.options, SitemapOptions::default());
        assert_eq!(resolution.warnings.len(), 4);
    }

    #[test]
    fn test_non_table_input() {
        let value = toml::Value::String("oops".to_string());
        let resolution = SitemapOptions::resolve(Some(&value));
        assert_eq!(resolution.options, SitemapOptions::default());
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_exclude_single_string_and_mixed_list() {
        let single = user(r#"exclude = "Draft""#);
        assert_eq!(
            SitemapOptions::resolve(Some(&single)).options.exclude,
            vec!["Draft"]
        );

        let mixed = user(r#"exclude = ["Draft", 1, "Private"]"#);
        let resolution = SitemapOptions::resolve(Some(&mixed));
        assert_eq!(resolution.options.exclude, vec!["Draft", "Private"]);
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_string_flags_from_environment() {
        let value = user(
            r#"
nofollow = "true"

[enable]
pages = "false"
"#,
        );

        let options = SitemapOptions::resolve(Some(&value)).options;
        assert!(options.nofollow);
        assert!(!options.enable.pages);
    }

    #[test]
    fn test_string_flag_must_be_boolean_text() {
        let value = user(
            r#"
nofollow = "yes"

[enable]
posts = 1
categories = "FALSE"
"#,
        );

        let resolution = SitemapOptions::resolve(Some(&value));

        assert!(!resolution.options.nofollow);
        assert!(resolution.options.enable.posts);
        assert!(!resolution.options.enable.categories);
        assert_eq!(
            resolution.warnings,
            vec![
                OptionWarning::Malformed {
                    key: "enable.posts".to_string(),
                    expected: "a boolean"
                },
                OptionWarning::Malformed {
                    key: "nofollow".to_string(),
                    expected: "a boolean"
                },
            ]
        );
    }

    #[test]
    fn test_enable_list_is_not_a_table() {
        let value = user("enable = [false, false, false]");

        let resolution = SitemapOptions::resolve(Some(&value));

        assert_eq!(resolution.options.enable, Sections::default());
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let value = user(r#"colour = "blue""#);
        let resolution = SitemapOptions::resolve(Some(&value));
        assert_eq!(resolution.options, SitemapOptions::default());
        assert!(resolution.warnings.is_empty());
    }
}
