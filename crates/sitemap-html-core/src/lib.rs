//! sitemap-html Core Library
//!
//! Site configuration, the content model, frontmatter parsing and error
//! handling shared by the sitemap-html generator and CLI.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;

pub use config::{SiteConfig, SiteFile, UrlResolver};
pub use content::{Category, Post, SiteModel, StandalonePage};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
