//! End-to-end tests: a source directory on disk in, one sitemap file out.

use std::{fs, path::Path, sync::Arc};

use sitemap_html_core::{SiteConfig, SiteFile};
use sitemap_html_generator::{
    DirectorySource, HostMode, Layout, LocalFilesystem, RunOutcome, SitemapHtml, Trigger,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A small site with two dated posts, one category and two pages.
fn sample_site() -> (TempDir, SiteConfig) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");

    write(
        &source,
        "_posts/a.md",
        "---\ntitle: A\ndate: 2024-01-01\ncategories: [Guides]\n---\nFirst.",
    );
    write(
        &source,
        "_posts/b.md",
        "---\ntitle: B\ndate: 2024-06-01\n---\nSecond.",
    );
    write(&source, "draft.md", "---\ntitle: My Draft Page\n---\n");
    write(&source, "about.md", "---\ntitle: About\n---\n");

    let mut site = SiteConfig::new("Example Site");
    site.source_dir = source;
    site.public_dir = dir.path().join("public");

    (dir, site)
}

fn sitemap(site: SiteConfig, options: &str) -> SitemapHtml {
    let source = DirectorySource::new(site.source_dir.clone());
    SitemapHtml::new(site, Arc::new(source), Arc::new(LocalFilesystem))
        .with_options(Some(toml::from_str(options).unwrap()))
}

fn generated_html(outcome: RunOutcome) -> String {
    match outcome {
        RunOutcome::Generated { path, .. } => fs::read_to_string(path).unwrap(),
        other => panic!("expected a generated sitemap, got {other:?}"),
    }
}

#[tokio::test]
async fn test_posts_newest_first() {
    let (_dir, site) = sample_site();

    let html = generated_html(sitemap(site, "").run(Trigger::Hook).await);

    let b = html.find(">B<").unwrap();
    let a = html.find(">A<").unwrap();
    assert!(b < a, "B (June) must precede A (January)");
    assert!(html.contains("2024-06-01"));
}

#[tokio::test]
async fn test_excluded_pages_are_omitted() {
    let (_dir, site) = sample_site();

    let html = generated_html(
        sitemap(site, r#"exclude = ["Draft"]"#)
            .run(Trigger::Hook)
            .await,
    );

    assert!(html.contains(">About<"));
    assert!(html.contains(r#"href="/about.html""#));
    assert!(!html.contains("My Draft Page"));
}

#[tokio::test]
async fn test_disabled_categories_leave_no_trace() {
    let (_dir, site) = sample_site();

    let html = generated_html(
        sitemap(site, "[enable]\ncategories = false")
            .run(Trigger::Hook)
            .await,
    );

    assert!(!html.contains(">Categories<"));
    assert!(!html.contains("Guides"));
    assert!(html.contains(">Posts<"));
    assert!(html.contains(">Pages<"));
}

#[tokio::test]
async fn test_forced_command_overwrites_existing_file() {
    let (_dir, site) = sample_site();
    let dest = site.public_dir.join("nested").join("map.html");
    write(&site.public_dir, "nested/map.html", "stale content");

    let outcome = sitemap(site, r#"path = "nested/map.html""#)
        .run(Trigger::Command { force: true })
        .await;

    let RunOutcome::Generated { path, layout } = outcome else {
        panic!("expected a generated sitemap");
    };
    assert_eq!(path, dest);
    assert_eq!(layout, Layout::Flat);

    let html = fs::read_to_string(&dest).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("stale content"));
}

#[tokio::test]
async fn test_serve_mode_only_runs_when_forced() {
    let (_dir, site) = sample_site();
    let dest = site.public_dir.join("sitemap.html");
    let sitemap = sitemap(site, "").with_mode(HostMode::Serve);

    assert!(matches!(sitemap.run(Trigger::Hook).await, RunOutcome::Skipped));
    assert!(!dest.exists());

    assert!(sitemap.run(Trigger::Command { force: true }).await.is_generated());
    assert!(dest.exists());
}

#[tokio::test]
async fn test_layout_and_nofollow_from_config_file() {
    let (dir, mut site) = sample_site();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[site]
title = "From File"
root = "/blog/"

[html_sitemap]
layout = "rich"
nofollow = true
"#,
    )
    .unwrap();

    let file = SiteFile::load(&config_path).unwrap();
    site.title = file.site.title;
    site.root = file.site.root;
    let source = DirectorySource::new(site.source_dir.clone());
    let sitemap = SitemapHtml::new(site, Arc::new(source), Arc::new(LocalFilesystem))
        .with_options(file.html_sitemap);

    let html = generated_html(sitemap.run(Trigger::Hook).await);

    assert!(html.contains("layout-rich"));
    assert!(html.contains("<title>Sitemap - From File</title>"));
    assert!(html.contains(r#"href="/blog/about.html" class="item-link" rel="nofollow""#));
    assert!(html.contains(r#"<a href="/blog/" class="nav-home">"#));
}
