//! Content model types.
//!
//! The content model is the host's in-memory view of every post, category and
//! standalone page after parsing. It is read-only to the sitemap pipeline.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dated article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title, if any.
    #[serde(default)]
    pub title: Option<String>,

    /// Internal path of the post (e.g., "hello-world/").
    pub path: String,

    /// Publication date.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    /// Category names this post belongs to.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A taxonomy grouping of posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name, if any.
    #[serde(default)]
    pub name: Option<String>,

    /// Internal path of the category listing.
    pub path: String,

    /// Paths of the member posts.
    #[serde(default)]
    pub posts: Vec<String>,
}

/// A standalone page outside the post stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandalonePage {
    /// Page title, if any.
    #[serde(default)]
    pub title: Option<String>,

    /// Internal path of the page. Pages without one are never listed.
    #[serde(default)]
    pub path: Option<String>,

    /// Date of the page.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Ordered collections of site content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteModel {
    /// Posts in source order.
    #[serde(default)]
    pub posts: Vec<Post>,

    /// Categories in listing order.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Standalone pages in source order.
    #[serde(default)]
    pub pages: Vec<StandalonePage>,
}

impl SiteModel {
    /// Build a model from posts and pages, deriving categories from the posts.
    #[must_use]
    pub fn new(posts: Vec<Post>, pages: Vec<StandalonePage>) -> Self {
        let categories = Category::collect(&posts);
        Self {
            posts,
            categories,
            pages,
        }
    }

    /// Whether the model has no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.categories.is_empty() && self.pages.is_empty()
    }
}

impl Category {
    /// Group posts by category name, ordered by name.
    ///
    /// Every category gets its own path. Names that slugify to the same
    /// string are told apart with a numeric suffix in name order.
    #[must_use]
    pub fn collect(posts: &[Post]) -> Vec<Self> {
        let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();

        for post in posts {
            for name in &post.categories {
                let members = groups.entry(name.as_str()).or_default();
                if !members.contains(&post.path) {
                    members.push(post.path.clone());
                }
            }
        }

        let mut taken = HashSet::new();
        groups
            .into_iter()
            .map(|(name, posts)| Self {
                name: Some(name.to_string()),
                path: format!("categories/{}/", unique_slug(name, &mut taken)),
                posts,
            })
            .collect()
    }
}

fn unique_slug(name: &str, taken: &mut HashSet<String>) -> String {
    let mut base = slugify(name);
    if base.is_empty() {
        base = "uncategorized".to_string();
    }

    let mut slug = base.clone();
    let mut n = 2;
    while !taken.insert(slug.clone()) {
        slug = format!("{base}-{n}");
        n += 1;
    }
    slug
}

/// Convert a name into a URL slug.
///
/// A name made only of punctuation falls back to the hex form of its bytes.
#[must_use]
pub fn slugify(s: &str) -> String {
    let trimmed = s.trim();
    let slug: String = trimmed
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if slug.chars().any(|c| c != '-' && c != '_') {
        slug
    } else {
        trimmed.bytes().map(|b| format!("{b:02x}")).collect()
    }
}

/// Parse a date written in any of the common frontmatter notations.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD` and `YYYY/MM/DD`. Naive values are taken as UTC.
#[must_use]
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}
