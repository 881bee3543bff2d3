use crate::output::{print_json, print_table};
use anyhow::Context;
use byline_core::badges::{award_badges, evidence_for_author};
use byline_core::config::Config;
use byline_core::content::load_local_index;
use byline_core::evidence::{map_remote_documents, merge_badge_article_sources, RemoteDocument};
use byline_core::writer::writer_slug_lookup;
use std::path::Path;

/// Merge the local article index with an exported file of remote documents
/// (`[{"id": ..., "data": {...}}]`) and print the writer's badge report.
pub fn run(root: &Path, slug: &str, remote: Option<&Path>, json: bool) -> anyhow::Result<()> {
    byline_core::paths::validate_slug(slug)?;
    let config = Config::load(root).context("failed to load config")?;

    let documents: Vec<RemoteDocument> = match remote {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("{} is not a JSON list of documents", path.display()))?
        }
        None => Vec::new(),
    };

    let local = load_local_index(root).context("failed to load article index")?;
    let remote_articles = map_remote_documents(&documents, &config.articles.default_target);
    let merged = merge_badge_article_sources(&local, &remote_articles);

    let lookup = writer_slug_lookup(root)?;
    let evidence = evidence_for_author(&merged, slug, &lookup);
    let report = award_badges(slug, &config.badges.tiers, &evidence);

    if json {
        return print_json(&serde_json::json!({
            "slug": slug,
            "articles": evidence,
            "report": report,
        }));
    }

    let rows = evidence
        .iter()
        .map(|a| vec![a.slug.clone(), a.title.clone(), a.published_at.clone()])
        .collect();
    print_table(&["SLUG", "TITLE", "PUBLISHED"], rows);
    println!();
    println!("Articles: {}", report.article_count);
    let earned: Vec<&str> = report.earned.iter().map(|t| t.label.as_str()).collect();
    println!(
        "Badges:   {}",
        if earned.is_empty() { "none".to_string() } else { earned.join(", ") }
    );
    if let Some(next) = &report.next {
        println!("Next:     {} ({} articles)", next.label, next.min_articles);
    }
    Ok(())
}
