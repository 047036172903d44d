//! Command implementations.

pub mod build;
pub mod generate;
pub mod watch;

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use sitemap_html_core::SiteFile;
use sitemap_html_generator::{
    DirectorySource, HostMode, LocalFilesystem, RunOutcome, SitemapHtml,
};

/// Load the site configuration and assemble a generator over the local
/// filesystem.
pub fn load_sitemap(config_path: &Path, drafts: bool, mode: HostMode) -> Result<SitemapHtml> {
    let file = SiteFile::load_with_env(config_path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let source = DirectorySource::new(file.site.source_dir.clone()).with_drafts(drafts);

    Ok(
        SitemapHtml::new(file.site, Arc::new(source), Arc::new(LocalFilesystem))
            .with_options(file.html_sitemap)
            .with_mode(mode),
    )
}

/// Print a run outcome. A failed run becomes the command's error.
pub fn report(outcome: RunOutcome) -> Result<()> {
    match outcome {
        RunOutcome::Generated { path, layout } => {
            println!("  ✓ Sitemap written to {} ({layout})", path.display());
            Ok(())
        }
        RunOutcome::Skipped => {
            println!("  - Sitemap skipped (use --force to generate)");
            Ok(())
        }
        RunOutcome::Failed { error } => Err(error).wrap_err("Sitemap generation failed"),
    }
}
