//! Content model loading.
//!
//! [`ContentSource`] is how the pipeline obtains the site's content model.
//! [`DirectorySource`] builds one from a source directory laid out the usual
//! way: posts under `_posts/`, every other content file a standalone page.

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::Datelike;
use rayon::prelude::*;
use sitemap_html_core::{
    Post, SiteModel, StandalonePage, content::slugify, frontmatter::parse_frontmatter,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory holding posts, relative to the source directory.
pub const POSTS_DIR: &str = "_posts";

const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "html", "htm"];

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The background loading task did not complete.
    #[error("content loading task failed: {0}")]
    Join(String),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Provides the site's content model.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load (or return the already loaded) content model.
    async fn load(&self) -> Result<SiteModel>;
}

/// An in-memory model is its own source.
#[async_trait]
impl ContentSource for SiteModel {
    async fn load(&self) -> Result<SiteModel> {
        Ok(self.clone())
    }
}

/// Loads content from a source directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    source_dir: PathBuf,
    drafts: bool,
}

/// A parsed content file before it is classified.
#[derive(Debug)]
enum Entry {
    Post(Post),
    Page(StandalonePage),
}

impl DirectorySource {
    /// Create a source reading from `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            drafts: false,
        }
    }

    /// Include posts marked as drafts.
    #[must_use]
    pub fn with_drafts(mut self, drafts: bool) -> Self {
        self.drafts = drafts;
        self
    }

    /// Walk the source directory and build the model. Blocking.
    pub fn collect(&self) -> Result<SiteModel> {
        if !self.source_dir.is_dir() {
            warn!(
                dir = %self.source_dir.display(),
                "source directory not found, no content loaded"
            );
            return Ok(SiteModel::default());
        }

        info!(dir = %self.source_dir.display(), "collecting content");

        let files = self.find_content_files()?;
        debug!(count = files.len(), "found content files");

        let entries: Vec<Entry> = files
            .par_iter()
            .filter_map(|path| match self.parse_file(path) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read content file");
                    None
                }
            })
            .collect();

        let mut posts = Vec::new();
        let mut pages = Vec::new();
        for entry in entries {
            match entry {
                Entry::Post(post) => posts.push(post),
                Entry::Page(page) => pages.push(page),
            }
        }

        let model = SiteModel::new(posts, pages);

        info!(
            posts = model.posts.len(),
            categories = model.categories.len(),
            pages = model.pages.len(),
            "content collection complete"
        );

        Ok(model)
    }

    fn find_content_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_visible);

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && is_content_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Parse one file. Drafts and files with broken frontmatter yield `None`.
    fn parse_file(&self, path: &Path) -> Result<Option<Entry>> {
        let raw = fs::read_to_string(path)?;
        let relative = path.strip_prefix(&self.source_dir).unwrap_or(path);

        let frontmatter = match parse_frontmatter(&raw, relative) {
            Ok((frontmatter, _body)) => frontmatter,
            Err(e) => {
                warn!(error = %e, "skipping file with invalid frontmatter");
                return Ok(None);
            }
        };

        if let Ok(in_posts) = relative.strip_prefix(POSTS_DIR) {
            if frontmatter.draft && !self.drafts {
                debug!(path = %relative.display(), "skipping draft");
                return Ok(None);
            }

            let path = frontmatter.permalink.clone().unwrap_or_else(|| {
                let slug = slugify(&without_extension(in_posts));
                match frontmatter.date {
                    Some(date) => format!(
                        "{:04}/{:02}/{:02}/{slug}/",
                        date.year(),
                        date.month(),
                        date.day()
                    ),
                    None => format!("{slug}/"),
                }
            });

            return Ok(Some(Entry::Post(Post {
                title: frontmatter.title,
                path,
                date: frontmatter.date,
                categories: frontmatter.categories,
            })));
        }

        let path = frontmatter
            .permalink
            .clone()
            .unwrap_or_else(|| format!("{}.html", without_extension(relative)));

        Ok(Some(Entry::Page(StandalonePage {
            title: frontmatter.title,
            path: Some(path),
            date: frontmatter.updated.or(frontmatter.date),
        })))
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    async fn load(&self) -> Result<SiteModel> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.collect())
            .await
            .map_err(|e| CollectorError::Join(e.to_string()))?
    }
}

/// Hidden entries and `_`-prefixed entries are skipped, except the posts
/// directory at the top level.
fn is_visible(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if entry.depth() == 1 && name == POSTS_DIR {
        return true;
    }
    !name.starts_with('.') && !name.starts_with('_')
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.as_str()))
}

/// Path with `/` separators and the extension removed.
fn without_extension(path: &Path) -> String {
    path.with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn sample_site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(
            root,
            "_posts/hello-world.md",
            "---\ntitle: Hello World\ndate: 2024-06-01 10:00:00\ncategories: [Rust, Notes]\n---\nHi",
        );
        write(
            root,
            "_posts/older.md",
            "---\ntitle: Older\ndate: 2024-01-01\ncategories: Rust\n---\nOld",
        );
        write(
            root,
            "_posts/wip.md",
            "---\ntitle: WIP\ndraft: true\n---\nNot yet",
        );
        write(root, "_posts/broken.md", "---\ntitle: [unclosed\n---\n");
        write(root, "about/index.md", "---\ntitle: About\nupdated: 2024-02-02\n---\n");
        write(root, "links.html", "<p>no frontmatter</p>");
        write(root, "_drafts/secret.md", "---\ntitle: Secret\n---\n");
        write(root, ".hidden/page.md", "---\ntitle: Hidden\n---\n");
        write(root, "notes.txt", "ignored");

        dir
    }

    #[test]
    fn test_collect_posts_and_pages() {
        let dir = sample_site();

        let model = DirectorySource::new(dir.path()).collect().unwrap();

        let post_titles: Vec<_> = model.posts.iter().filter_map(|p| p.title.as_deref()).collect();
        assert_eq!(post_titles, vec!["Hello World", "Older"]);
        assert_eq!(model.posts[0].path, "2024/06/01/hello-world/");
        assert_eq!(model.posts[1].categories, vec!["Rust"]);

        let page_paths: Vec<_> = model.pages.iter().filter_map(|p| p.path.as_deref()).collect();
        assert_eq!(page_paths, vec!["about/index.html", "links.html"]);
        assert_eq!(model.pages[0].title.as_deref(), Some("About"));
        assert!(model.pages[0].date.is_some());
        assert!(model.pages[1].title.is_none());
    }

    #[test]
    fn test_categories_are_derived() {
        let dir = sample_site();

        let model = DirectorySource::new(dir.path()).collect().unwrap();

        let names: Vec<_> = model.categories.iter().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec!["Notes", "Rust"]);
        assert_eq!(model.categories[1].posts.len(), 2);
    }

    #[test]
    fn test_drafts_are_optional() {
        let dir = sample_site();

        let model = DirectorySource::new(dir.path())
            .with_drafts(true)
            .collect()
            .unwrap();

        let wip = model
            .posts
            .iter()
            .find(|p| p.title.as_deref() == Some("WIP"))
            .unwrap();
        assert_eq!(wip.path, "wip/");
    }

    #[test]
    fn test_permalink_override() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contact.md",
            "---\ntitle: Contact\npermalink: reach-us/\n---\n",
        );

        let model = DirectorySource::new(dir.path()).collect().unwrap();

        assert_eq!(model.pages[0].path.as_deref(), Some("reach-us/"));
    }

    #[test]
    fn test_missing_source_dir_is_empty() {
        let model = DirectorySource::new("/nonexistent/source").collect().unwrap();
        assert!(model.is_empty());
    }

    #[tokio::test]
    async fn test_load_is_async() {
        let dir = sample_site();
        let source = DirectorySource::new(dir.path());

        let model = source.load().await.unwrap();

        assert_eq!(model.posts.len(), 2);
    }

    #[tokio::test]
    async fn test_model_is_its_own_source() {
        let model = SiteModel::default();
        assert_eq!(model.load().await.unwrap(), model);
    }
}
