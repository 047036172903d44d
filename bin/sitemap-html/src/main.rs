//! sitemap-html CLI
//!
//! Generates a human-readable HTML sitemap page for a static site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for sitemap-html.
#[derive(Parser)]
#[command(
    name = "sitemap-html",
    version,
    about = "Generate an HTML sitemap page for a static site"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Generate the sitemap as part of a site build
    Build {
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },
    /// Generate the sitemap on demand
    Generate {
        /// Remove an existing sitemap file before writing
        #[arg(short, long)]
        force: bool,
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },
    /// Regenerate on every source change (development server mode)
    Watch {
        /// Generate on every change instead of skipping
        #[arg(short, long)]
        force: bool,
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sitemap_html::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { drafts } => {
            sitemap_html::cmd::build::run(&cli.config, drafts).await?;
        }
        Commands::Generate { force, drafts } => {
            sitemap_html::cmd::generate::run(&cli.config, force, drafts).await?;
        }
        Commands::Watch { force, drafts } => {
            sitemap_html::cmd::watch::run(&cli.config, force, drafts).await?;
        }
    }

    Ok(())
}
