//! Frontmatter parsing for content files.
//!
//! Frontmatter is read leniently: a title may be any scalar, dates may use any
//! notation understood by [`parse_date`], and categories may be a single name
//! or a (possibly nested) list. Values that cannot be understood are dropped
//! rather than failing the file.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::{
    content::parse_date,
    error::{CoreError, Result},
};

/// Frontmatter metadata for content files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// Content title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,

    /// Publication date.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,

    /// Last updated date.
    #[serde(default, deserialize_with = "lenient_date")]
    pub updated: Option<DateTime<Utc>>,

    /// Whether this is a draft.
    #[serde(default)]
    pub draft: bool,

    /// Categories for the content.
    #[serde(default, deserialize_with = "lenient_names")]
    pub categories: Vec<String>,

    /// Explicit output path, overriding the one derived from the file name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub permalink: Option<String>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a string, returning it with the remaining body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    let value = match format {
        _ if fm_str.is_empty() => Value::Null,
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str::<Value>(fm_str)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            let table = toml::from_str::<toml::Value>(fm_str)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            toml_to_yaml(table)
        }
    };

    // An empty YAML block parses to null.
    let value = if value.is_null() {
        Value::Mapping(Default::default())
    } else {
        value
    };

    let frontmatter: Frontmatter =
        serde_yaml::from_value(value).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    Ok((frontmatter, body.to_string()))
}

/// Convert TOML frontmatter into the YAML value model so both formats share
/// one lenient deserializer. TOML datetimes become their textual form.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(scalar_to_string)
        .and_then(|s| parse_date(&s)))
}

fn lenient_names<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    fn flatten(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Sequence(items) => items.iter().for_each(|item| flatten(item, out)),
            other => {
                if let Some(name) = scalar_to_string(other) {
                    let name = name.trim();
                    if !name.is_empty() && !out.iter().any(|n| n == name) {
                        out.push(name.to_string());
                    }
                }
            }
        }
    }

    let value = Option::<Value>::deserialize(deserializer)?;
    let mut names = Vec::new();
    if let Some(value) = &value {
        flatten(value, &mut names);
    }
    Ok(names)
}
