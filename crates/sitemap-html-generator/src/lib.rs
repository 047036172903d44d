//! HTML sitemap generation.
//!
//! Builds a single human-readable page listing a site's posts, categories
//! and standalone pages.
//!
//! # Modules
//!
//! - [`options`] - User option resolution with defaults
//! - [`selector`] - Content selection, ordering and filtering
//! - [`template`] - Layouts, locales and inline styles
//! - [`document`] - Typed HTML tree with escaping
//! - [`render`] - Page rendering
//! - [`writer`] - Output materialization
//! - [`collector`] - Content model loading
//! - [`generate`] - Pipeline orchestration

pub mod collector;
pub mod document;
pub mod generate;
pub mod options;
pub mod render;
pub mod selector;
pub mod template;
pub mod writer;

/// Log target for pipeline outcome messages.
pub const LOG_TARGET: &str = "sitemap_html";

pub use collector::{CollectorError, ContentSource, DirectorySource};
pub use generate::{GenerateError, HostMode, RunOutcome, SitemapHtml, Trigger};
pub use options::{OptionWarning, Sections, SitemapOptions};
pub use render::PageRenderer;
pub use selector::{ContentItem, Selection};
pub use template::{Layout, Locale, TemplateContext, TemplateRegistry};
pub use writer::{Filesystem, LocalFilesystem, OutputWriter, WriteError};
