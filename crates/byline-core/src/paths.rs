use crate::error::{BylineError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BYLINE_DIR: &str = ".byline";
pub const WRITERS_DIR: &str = ".byline/writers";

pub const CONFIG_FILE: &str = ".byline/config.yaml";
pub const ARTICLE_INDEX_FILE: &str = ".byline/articles.yaml";

pub const PROFILE_FILE: &str = "profile.yaml";
pub const AGREEMENT_FILE: &str = "agreement.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn byline_dir(root: &Path) -> PathBuf {
    root.join(BYLINE_DIR)
}

pub fn writers_dir(root: &Path) -> PathBuf {
    root.join(WRITERS_DIR)
}

pub fn writer_dir(root: &Path, slug: &str) -> PathBuf {
    writers_dir(root).join(slug)
}

pub fn profile_path(root: &Path, slug: &str) -> PathBuf {
    writer_dir(root, slug).join(PROFILE_FILE)
}

pub fn agreement_path(root: &Path, slug: &str) -> PathBuf {
    writer_dir(root, slug).join(AGREEMENT_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn article_index_path(root: &Path) -> PathBuf {
    root.join(ARTICLE_INDEX_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= 64 && slug_re().is_match(slug)
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if !is_valid_slug(slug) {
        return Err(BylineError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
