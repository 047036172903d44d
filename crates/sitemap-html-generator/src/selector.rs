//! Content selection.
//!
//! Turns the site model into the three item sequences shown on the sitemap,
//! applying section toggles, page exclusion and post ordering.

use chrono::{DateTime, Utc};
use sitemap_html_core::{Category, Post, SiteModel, StandalonePage, UrlResolver};
use tracing::debug;

use crate::options::SitemapOptions;

/// Text shown in place of a missing date.
pub const NO_DATE: &str = "No Date";

const UNTITLED_POST: &str = "Untitled";
const UNTITLED_PAGE: &str = "Untitled Page";
const UNCATEGORIZED: &str = "Uncategorized";

/// Secondary information shown under an item title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Meta {
    /// A formatted date (or [`NO_DATE`]).
    Date(String),
    /// Number of posts in a category.
    Count(usize),
}

/// One linkable entry of the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Display title.
    pub title: String,
    /// Resolved public URL.
    pub url: String,
    /// Secondary metadata.
    pub meta: Meta,
}

/// The item sequences to render, in section order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub posts: Vec<ContentItem>,
    pub categories: Vec<ContentItem>,
    pub pages: Vec<ContentItem>,
}

impl Selection {
    /// Whether no section has any item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.categories.is_empty() && self.pages.is_empty()
    }
}

/// Select the content to list according to the options.
#[must_use]
pub fn select(options: &SitemapOptions, model: &SiteModel, urls: &dyn UrlResolver) -> Selection {
    let posts = if options.enable.posts {
        sort_posts(&model.posts)
            .into_iter()
            .map(|post| post_item(post, urls))
            .collect()
    } else {
        Vec::new()
    };

    let categories = if options.enable.categories {
        model
            .categories
            .iter()
            .map(|category| category_item(category, urls))
            .collect()
    } else {
        Vec::new()
    };

    let pages = if options.enable.pages {
        filter_pages(&model.pages, &options.exclude)
            .into_iter()
            .filter_map(|page| page_item(page, urls))
            .collect()
    } else {
        Vec::new()
    };

    let selection = Selection {
        posts,
        categories,
        pages,
    };

    debug!(
        posts = selection.posts.len(),
        categories = selection.categories.len(),
        pages = selection.pages.len(),
        "selected content"
    );

    selection
}

/// Order posts newest first. Equal dates keep their source order and undated
/// posts come last.
#[must_use]
pub fn sort_posts(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Keep the pages that have a path and match no exclusion pattern.
///
/// Patterns are matched as case-sensitive substrings of the raw title and the
/// raw path.
#[must_use]
pub fn filter_pages<'a>(
    pages: &'a [StandalonePage],
    exclude: &[String],
) -> Vec<&'a StandalonePage> {
    pages
        .iter()
        .filter(|page| {
            let Some(path) = page.path.as_deref().filter(|p| !p.is_empty()) else {
                return false;
            };
            let title = page.title.as_deref().unwrap_or_default();
            !exclude
                .iter()
                .any(|pattern| title.contains(pattern.as_str()) || path.contains(pattern.as_str()))
        })
        .collect()
}

/// Format a date as `YYYY-MM-DD`, or [`NO_DATE`] when absent.
#[must_use]
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => NO_DATE.to_string(),
    }
}

fn display_title(title: Option<&str>, fallback: &str) -> String {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => fallback.to_string(),
    }
}

fn post_item(post: &Post, urls: &dyn UrlResolver) -> ContentItem {
    ContentItem {
        title: display_title(post.title.as_deref(), UNTITLED_POST),
        url: urls.url_for(&post.path),
        meta: Meta::Date(format_date(post.date.as_ref())),
    }
}

fn category_item(category: &Category, urls: &dyn UrlResolver) -> ContentItem {
    ContentItem {
        title: display_title(category.name.as_deref(), UNCATEGORIZED),
        url: urls.url_for(&category.path),
        meta: Meta::Count(category.posts.len()),
    }
}

fn page_item(page: &StandalonePage, urls: &dyn UrlResolver) -> Option<ContentItem> {
    let path = page.path.as_deref()?;
    Some(ContentItem {
        title: display_title(page.title.as_deref(), UNTITLED_PAGE),
        url: urls.url_for(path),
        meta: Meta::Date(format_date(page.date.as_ref())),
    })
}
