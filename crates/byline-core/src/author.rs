//! Author-name normalization and author → canonical slug resolution.
//!
//! Articles carry the author's display name, while badges and profiles are
//! keyed by slug. A writer's canonical slug can differ from a naive
//! slugification of their name (accents, initials), so the writer table is
//! consulted first and [`slugify`] is only the fallback.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// WriterLike
// ---------------------------------------------------------------------------

/// Minimal identity record needed to map a display name to a slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterLike {
    pub display_name: String,
    pub slug: String,
}

impl WriterLike {
    pub fn new(display_name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            slug: slug.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Lower-case `name` and collapse every whitespace run to a single space.
pub fn normalize_author_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

static NON_SLUG_RE: OnceLock<Regex> = OnceLock::new();
static DASH_RUN_RE: OnceLock<Regex> = OnceLock::new();

/// Generic slugification: lower-case, replace runs of characters outside
/// `[a-z0-9-]` with `-`, collapse dash runs, trim leading/trailing dashes.
///
/// Total over any input; may return an empty string.
pub fn slugify(value: &str) -> String {
    let non_slug = NON_SLUG_RE.get_or_init(|| Regex::new(r"[^a-z0-9-]+").unwrap());
    let dash_run = DASH_RUN_RE.get_or_init(|| Regex::new(r"-{2,}").unwrap());

    let lowered = value.to_lowercase();
    let replaced = non_slug.replace_all(&lowered, "-");
    let collapsed = dash_run.replace_all(&replaced, "-");
    collapsed.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// WriterSlugLookup
// ---------------------------------------------------------------------------

/// Reverse index from normalized display name to canonical slug.
#[derive(Debug, Clone, Default)]
pub struct WriterSlugLookup {
    by_key: HashMap<String, String>,
}

impl WriterSlugLookup {
    pub fn get(&self, author_name: &str) -> Option<&str> {
        self.by_key
            .get(&normalize_author_key(author_name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Build the lookup from `writers` in order. When two writers normalize to
/// the same key, the later one wins.
pub fn build_writer_slug_lookup<'a, I>(writers: I) -> WriterSlugLookup
where
    I: IntoIterator<Item = &'a WriterLike>,
{
    let mut by_key = HashMap::new();
    for writer in writers {
        by_key.insert(normalize_author_key(&writer.display_name), writer.slug.clone());
    }
    WriterSlugLookup { by_key }
}

/// Resolve an author display name to a slug: writer table first, generic
/// slugification on a miss.
pub fn resolve_author_slug(author_name: &str, lookup: &WriterSlugLookup) -> String {
    match lookup.get(author_name) {
        Some(slug) => slug.to_string(),
        None => slugify(author_name),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_and_spacing_insensitive() {
        assert_eq!(normalize_author_key("  Ada   LOVELACE "), "ada lovelace");
        assert_eq!(normalize_author_key("Ada\tLovelace\n"), "ada lovelace");
        assert_eq!(normalize_author_key(""), "");
    }

    #[test]
    fn slugify_replaces_and_collapses() {
        assert_eq!(slugify("Ada Lovelace"), "ada-lovelace");
        assert_eq!(slugify("  --Hello,   World!--  "), "hello-world");
        assert_eq!(slugify("a--b---c"), "a-b-c");
        assert_eq!(slugify("José Núñez"), "jos-n-ez");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn lookup_hit_wins_over_slugify() {
        let writers = vec![WriterLike::new("José Núñez", "jose-nunez")];
        let lookup = build_writer_slug_lookup(&writers);
        assert_eq!(resolve_author_slug("josé   núñez", &lookup), "jose-nunez");
    }

    #[test]
    fn lookup_miss_falls_back_to_slugify() {
        let writers = vec![WriterLike::new("Ada Lovelace", "ada")];
        let lookup = build_writer_slug_lookup(&writers);
        assert_eq!(resolve_author_slug("Grace Hopper", &lookup), "grace-hopper");
    }

    #[test]
    fn later_writer_wins_on_key_collision() {
        let writers = vec![
            WriterLike::new("Sam Lee", "sam-lee-1"),
            WriterLike::new("sam  lee", "sam-lee-2"),
        ];
        let lookup = build_writer_slug_lookup(&writers);
        assert_eq!(lookup.len(), 1);
        assert_eq!(resolve_author_slug("SAM LEE", &lookup), "sam-lee-2");

        let reversed: Vec<_> = writers.iter().rev().collect();
        let lookup = build_writer_slug_lookup(reversed);
        assert_eq!(resolve_author_slug("SAM LEE", &lookup), "sam-lee-1");
    }

    #[test]
    fn empty_lookup_always_slugifies() {
        let lookup = WriterSlugLookup::default();
        assert!(lookup.is_empty());
        assert_eq!(resolve_author_slug("The Editors", &lookup), "the-editors");
    }
}
