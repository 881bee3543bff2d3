use crate::author::{resolve_author_slug, WriterSlugLookup};
use crate::evidence::BadgeArticleSource;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BadgeTier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeTier {
    pub id: String,
    pub label: String,
    pub min_articles: u32,
}

impl BadgeTier {
    pub fn new(id: impl Into<String>, label: impl Into<String>, min_articles: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            min_articles,
        }
    }
}

pub fn default_tiers() -> Vec<BadgeTier> {
    vec![
        BadgeTier::new("first-article", "First article", 1),
        BadgeTier::new("five-articles", "Five articles", 5),
        BadgeTier::new("ten-articles", "Ten articles", 10),
        BadgeTier::new("twenty-five-articles", "Twenty-five articles", 25),
    ]
}

// ---------------------------------------------------------------------------
// BadgeReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeReport {
    pub author: String,
    pub article_count: u32,
    pub earned: Vec<BadgeTier>,
    pub next: Option<BadgeTier>,
    pub latest_published_at: Option<String>,
}

/// Keep the articles whose author resolves to `author_slug`.
pub fn evidence_for_author(
    articles: &[BadgeArticleSource],
    author_slug: &str,
    lookup: &WriterSlugLookup,
) -> Vec<BadgeArticleSource> {
    articles
        .iter()
        .filter(|a| resolve_author_slug(&a.author, lookup) == author_slug)
        .cloned()
        .collect()
}

/// Earned tiers are every tier whose threshold the evidence count meets,
/// lowest threshold first. `next` is the lowest tier still out of reach.
pub fn award_badges(author: &str, tiers: &[BadgeTier], evidence: &[BadgeArticleSource]) -> BadgeReport {
    let article_count = u32::try_from(evidence.len()).unwrap_or(u32::MAX);

    let mut sorted: Vec<&BadgeTier> = tiers.iter().collect();
    sorted.sort_by_key(|t| t.min_articles);

    let earned: Vec<BadgeTier> = sorted
        .iter()
        .filter(|t| t.min_articles <= article_count)
        .map(|t| (*t).clone())
        .collect();
    let next = sorted
        .iter()
        .find(|t| t.min_articles > article_count)
        .map(|t| (*t).clone());

    // ISO-8601 strings in a single format order lexically.
    let latest_published_at = evidence.iter().map(|a| a.published_at.clone()).max();

    BadgeReport {
        author: author.to_string(),
        article_count,
        earned,
        next,
        latest_published_at,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::{build_writer_slug_lookup, WriterLike};

    fn by(author: &str, slug: &str, published_at: &str) -> BadgeArticleSource {
        BadgeArticleSource {
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            author: author.to_string(),
            url: format!("/learn/general/{slug}"),
            published_at: published_at.to_string(),
            topic: None,
        }
    }

    #[test]
    fn evidence_uses_writer_table_then_slugify() {
        let writers = vec![WriterLike::new("José Núñez", "jose-nunez")];
        let lookup = build_writer_slug_lookup(&writers);
        let articles = vec![
            by("José Núñez", "a", "2025-01-01"),
            by("josé  NÚÑEZ", "b", "2025-01-02"),
            by("Grace Hopper", "c", "2025-01-03"),
        ];
        let jose = evidence_for_author(&articles, "jose-nunez", &lookup);
        assert_eq!(jose.len(), 2);
        let grace = evidence_for_author(&articles, "grace-hopper", &lookup);
        assert_eq!(grace.len(), 1);
        assert_eq!(grace[0].slug, "c");
    }

    #[test]
    fn awards_tiers_up_to_count() {
        let evidence: Vec<_> = (1..=6)
            .map(|i| by("Ada", &format!("a{i}"), &format!("2025-01-0{i}")))
            .collect();
        let report = award_badges("ada", &default_tiers(), &evidence);
        assert_eq!(report.article_count, 6);
        let earned: Vec<_> = report.earned.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(earned, ["first-article", "five-articles"]);
        assert_eq!(report.next.unwrap().id, "ten-articles");
        assert_eq!(report.latest_published_at.as_deref(), Some("2025-01-06"));
    }

    #[test]
    fn empty_evidence_yields_empty_report() {
        let report = award_badges("nobody", &default_tiers(), &[]);
        assert_eq!(report.article_count, 0);
        assert!(report.earned.is_empty());
        assert_eq!(report.next.unwrap().id, "first-article");
        assert_eq!(report.latest_published_at, None);
    }

    #[test]
    fn unsorted_tiers_are_ordered_by_threshold() {
        let tiers = vec![BadgeTier::new("big", "Big", 3), BadgeTier::new("small", "Small", 1)];
        let evidence = vec![by("Ada", "a", "2025-01-01")];
        let report = award_badges("ada", &tiers, &evidence);
        assert_eq!(report.earned[0].id, "small");
        assert_eq!(report.next.unwrap().id, "big");
    }

    #[test]
    fn all_tiers_earned_leaves_no_next() {
        let tiers = vec![BadgeTier::new("one", "One", 1)];
        let evidence = vec![by("Ada", "a", "2025-01-01"), by("Ada", "b", "2025-01-02")];
        let report = award_badges("ada", &tiers, &evidence);
        assert_eq!(report.earned.len(), 1);
        assert!(report.next.is_none());
    }
}
