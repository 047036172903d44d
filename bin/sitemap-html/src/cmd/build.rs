//! Build command - the post-build hook run after a site build

use std::{path::Path, time::Instant};

use color_eyre::eyre::Result;
use sitemap_html_generator::{HostMode, Trigger};

use super::{load_sitemap, report};

/// Run the build command.
///
/// Generates the sitemap the way a site build does: never forced.
pub async fn run(config_path: &Path, drafts: bool) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, drafts, "Starting sitemap build");

    let sitemap = load_sitemap(config_path, drafts, HostMode::Build)?;
    report(sitemap.run(Trigger::Hook).await)?;

    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Build finished");
    Ok(())
}
