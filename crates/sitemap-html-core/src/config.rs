//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Maps an internal content path to the public URL it is served at.
pub trait UrlResolver: Send + Sync {
    /// Resolve `path` to a public URL.
    fn url_for(&self, path: &str) -> String;
}

/// Configuration file layout: the site table plus the untyped sitemap table.
///
/// The `[html_sitemap]` table is kept as a raw value so that partial or
/// malformed user input can be merged key by key instead of rejecting the
/// whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteFile {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// User overrides for the HTML sitemap.
    #[serde(default)]
    pub html_sitemap: Option<toml::Value>,
}

/// Site-wide configuration supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// URL root the site is mounted at (e.g., "/" or "/blog/").
    #[serde(default = "default_root")]
    pub root: String,

    /// Site language code.
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory holding the content sources.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Public output directory of the built site.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

fn default_root() -> String {
    "/".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("source")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

impl SiteConfig {
    /// Create a site configuration with default directories and root.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            root: default_root(),
            language: default_language(),
            source_dir: default_source_dir(),
            public_dir: default_public_dir(),
        }
    }

    /// Resolve a path relative to the public output directory.
    #[must_use]
    pub fn public_path(&self, relative: &str) -> PathBuf {
        self.public_dir.join(relative.trim_start_matches('/'))
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if !self.root.starts_with('/') {
            tracing::warn!(root = %self.root, "site.root should start with a slash");
        }

        Ok(())
    }
}

impl UrlResolver for SiteConfig {
    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
            return path.to_string();
        }

        let root = self.root.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{root}/{path}")
    }
}

impl SiteFile {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let file: SiteFile = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        file.site.validate()?;
        Ok(file)
    }

    /// Load configuration with `SITEMAP_HTML__` environment overrides layered on top.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("SITEMAP_HTML")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let file: SiteFile = settings.try_deserialize()?;
        file.site.validate()?;
        Ok(file)
    }
}
