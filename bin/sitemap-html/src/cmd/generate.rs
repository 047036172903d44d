//! Generate command - on-demand sitemap generation

use std::path::Path;

use color_eyre::eyre::Result;
use sitemap_html_generator::{HostMode, Trigger};

use super::{load_sitemap, report};

/// Run the generate command.
///
/// With `force`, an existing sitemap file is removed before the new one is
/// written.
pub async fn run(config_path: &Path, force: bool, drafts: bool) -> Result<()> {
    tracing::info!(?config_path, force, drafts, "Generating sitemap");

    let sitemap = load_sitemap(config_path, drafts, HostMode::Build)?;
    report(sitemap.run(Trigger::Command { force }).await)
}
