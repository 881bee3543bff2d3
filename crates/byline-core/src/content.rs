use crate::error::Result;
use crate::evidence::BadgeArticleSource;
use crate::paths;
use std::path::Path;

/// Load the build-time article index. A missing index is an empty list;
/// a malformed one is an error since it is build output, not remote data.
pub fn load_local_index(root: &Path) -> Result<Vec<BadgeArticleSource>> {
    let path = paths::article_index_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(&path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let articles: Vec<BadgeArticleSource> = serde_yaml::from_str(&data)?;
    tracing::debug!(count = articles.len(), "loaded local article index");
    Ok(articles)
}

pub fn save_local_index(root: &Path, articles: &[BadgeArticleSource]) -> Result<()> {
    let data = serde_yaml::to_string(articles)?;
    crate::io::atomic_write(&paths::article_index_path(root), data.as_bytes())
}
