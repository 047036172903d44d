//! Sitemap generation pipeline.
//!
//! Ties the pieces together: load content, resolve options and template,
//! select, render, write.

use std::{path::PathBuf, sync::Arc, time::Instant};

use sitemap_html_core::SiteConfig;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    LOG_TARGET,
    collector::{CollectorError, ContentSource},
    options::SitemapOptions,
    render::PageRenderer,
    selector,
    template::{Layout, Locale, TemplateRegistry},
    writer::{Filesystem, OutputWriter, WriteError},
};

/// Generation errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Loading the content model failed.
    #[error("content error: {0}")]
    Source(#[from] CollectorError),

    /// Writing the output failed.
    #[error("output error: {0}")]
    Write(#[from] WriteError),
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// What started a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Post-generation hook of a site build. Never forced.
    Hook,

    /// Explicit on-demand command.
    Command { force: bool },
}

impl Trigger {
    /// Whether the run removes an existing file before writing.
    #[must_use]
    pub fn force(&self) -> bool {
        match self {
            Self::Hook => false,
            Self::Command { force } => *force,
        }
    }
}

/// How the host is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostMode {
    /// One-shot build.
    #[default]
    Build,

    /// Long-lived development server. Unforced runs are skipped.
    Serve,
}

/// Result of a single run.
#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing was done.
    Skipped,

    /// The sitemap was written.
    Generated { path: PathBuf, layout: Layout },

    /// The run failed; the error has already been logged.
    Failed { error: GenerateError },
}

impl RunOutcome {
    /// Whether the run wrote a sitemap.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

/// HTML sitemap generator for one site.
pub struct SitemapHtml {
    site: SiteConfig,
    user_options: Option<toml::Value>,
    mode: HostMode,
    source: Arc<dyn ContentSource>,
    fs: Arc<dyn Filesystem>,
    templates: TemplateRegistry,
}

impl SitemapHtml {
    /// Create a generator reading content from `source` and writing through `fs`.
    #[must_use]
    pub fn new(site: SiteConfig, source: Arc<dyn ContentSource>, fs: Arc<dyn Filesystem>) -> Self {
        Self {
            site,
            user_options: None,
            mode: HostMode::default(),
            source,
            fs,
            templates: TemplateRegistry::new(),
        }
    }

    /// Set the raw `[html_sitemap]` table from the site configuration.
    #[must_use]
    pub fn with_options(mut self, options: Option<toml::Value>) -> Self {
        self.user_options = options;
        self
    }

    /// Set the host mode.
    #[must_use]
    pub fn with_mode(mut self, mode: HostMode) -> Self {
        self.mode = mode;
        self
    }

    /// Site configuration.
    #[must_use]
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Run once for `trigger`. Failures are logged and reported in the outcome.
    pub async fn run(&self, trigger: Trigger) -> RunOutcome {
        let force = trigger.force();

        if self.mode == HostMode::Serve && !force {
            info!(target: LOG_TARGET, "serve mode, skipping sitemap generation");
            return RunOutcome::Skipped;
        }

        let options = self.options();
        match self.execute(&options, force).await {
            Ok(path) => RunOutcome::Generated {
                path,
                layout: options.layout,
            },
            Err(e) => {
                error!(target: LOG_TARGET, error = %e, "sitemap generation failed");
                RunOutcome::Failed { error: e }
            }
        }
    }

    /// Generate the sitemap and return the path written.
    pub async fn generate(&self, force: bool) -> Result<PathBuf> {
        self.execute(&self.options(), force).await
    }

    async fn execute(&self, options: &SitemapOptions, force: bool) -> Result<PathBuf> {
        let start = Instant::now();

        let model = self.source.load().await?;
        let context = self
            .templates
            .context(options.layout, Locale::resolve(&self.site.language));

        let selection = selector::select(options, &model, &self.site);
        let html = PageRenderer::new(&self.site, options, &context).render(&selection);

        let destination = self.site.public_path(&options.path);
        OutputWriter::new(self.fs.as_ref())
            .write(&destination, &html, force)
            .await?;

        info!(
            target: LOG_TARGET,
            path = %destination.display(),
            layout = %options.layout,
            posts = selection.posts.len(),
            categories = selection.categories.len(),
            pages = selection.pages.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generated sitemap"
        );

        Ok(destination)
    }

    fn options(&self) -> SitemapOptions {
        SitemapOptions::resolve(self.user_options.as_ref()).options
    }
}
