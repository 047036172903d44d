//! sitemap-html CLI Library
//!
//! Command implementations for the `sitemap-html` binary. The generation
//! pipeline itself lives in `sitemap-html-generator`.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, generate, watch)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sitemap_html::cmd;
//!
//! # async fn demo() -> color_eyre::eyre::Result<()> {
//! cmd::generate::run(Path::new("config.toml"), true, false).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;

pub use sitemap_html_core::{SiteConfig, SiteFile};
pub use sitemap_html_generator::{HostMode, RunOutcome, SitemapHtml, Trigger};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
