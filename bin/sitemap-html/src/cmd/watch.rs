//! Watch command - regenerate the sitemap while a development server runs

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use color_eyre::eyre::{Result, WrapErr};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use sitemap_html_generator::{HostMode, Trigger};
use tokio::sync::mpsc;

use super::{load_sitemap, report};

/// Debounce interval for file changes.
const DEBOUNCE_MS: u64 = 200;

/// Run the watch command.
///
/// Every change under the source directory or to the configuration file
/// fires the generator in serve mode. Without `force` those runs are
/// skipped, matching what a development server does with its build hooks.
/// Draft posts are only included with `drafts`.
pub async fn run(config_path: &Path, force: bool, drafts: bool) -> Result<()> {
    tracing::info!(?config_path, force, drafts, "Starting watch mode");

    let trigger = trigger_for(force);
    let sitemap = load_sitemap(config_path, drafts, HostMode::Serve)?;
    let source_dir = sitemap.site().source_dir.clone();

    if let Err(e) = report(sitemap.run(trigger).await) {
        eprintln!("  ✗ {e:#}");
    }

    let (tx, mut rx) = mpsc::channel::<()>(16);

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                // Only trigger on write/modify events
                if matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_))
                        | EventKind::Create(_)
                        | EventKind::Remove(_)
                ) {
                    let _ = tx.blocking_send(());
                }
            }
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    for (path, mode) in watch_targets(config_path, &source_dir) {
        watcher
            .watch(&path, mode)
            .wrap_err_with(|| format!("Failed to watch {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Watching");
    }

    println!();
    println!("  Watching {} for changes", source_dir.display());
    println!("  Press Ctrl+C to stop");
    println!();

    let mut last_run = Instant::now();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watch mode");
                break;
            }
            more = next_batch(&mut rx, last_run) => {
                if !more {
                    break;
                }

                println!("  Change detected");

                // Pick up configuration edits on every run.
                let result = match load_sitemap(config_path, drafts, HostMode::Serve) {
                    Ok(sitemap) => report(sitemap.run(trigger).await),
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    tracing::error!("Regeneration failed: {e}");
                    eprintln!("  ✗ {e:#}");
                }

                last_run = Instant::now();
            }
        }
    }

    drop(watcher);
    Ok(())
}

/// Wait for the next batch of change events.
///
/// An event arriving within the debounce window of the previous run waits
/// out the rest of the window, then everything queued meanwhile is folded
/// into the same batch. Returns `false` once the watcher is gone.
async fn next_batch(rx: &mut mpsc::Receiver<()>, last_run: Instant) -> bool {
    if rx.recv().await.is_none() {
        return false;
    }

    let window = Duration::from_millis(DEBOUNCE_MS);
    if let Some(wait) = remaining_window(last_run.elapsed(), window) {
        tokio::time::sleep(wait).await;
    }

    while rx.try_recv().is_ok() {}
    true
}

/// Time left in the debounce window, if any.
fn remaining_window(elapsed: Duration, window: Duration) -> Option<Duration> {
    window.checked_sub(elapsed).filter(|wait| !wait.is_zero())
}

fn trigger_for(force: bool) -> Trigger {
    if force {
        Trigger::Command { force: true }
    } else {
        Trigger::Hook
    }
}

/// Paths to watch: the source tree recursively and the configuration file.
fn watch_targets(config_path: &Path, source_dir: &Path) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets = Vec::new();

    if source_dir.exists() {
        targets.push((source_dir.to_path_buf(), RecursiveMode::Recursive));
    } else {
        tracing::warn!(
            dir = %source_dir.display(),
            "Source directory does not exist, not watching it"
        );
    }

    if config_path.exists() {
        targets.push((config_path.to_path_buf(), RecursiveMode::NonRecursive));
    }

    targets
}
