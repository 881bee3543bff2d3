use anyhow::Context;
use byline_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let site_name = name.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "site".to_string())
    });

    println!("Initializing byline in: {}", root.display());

    for dir in [paths::BYLINE_DIR, paths::WRITERS_DIR] {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let config_path = paths::config_path(root);
    if !config_path.exists() {
        Config::new(&site_name)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    let index_path = paths::article_index_path(root);
    if io::write_if_missing(&index_path, b"[]\n").context("failed to write articles.yaml")? {
        println!("  created: {}", paths::ARTICLE_INDEX_FILE);
    } else {
        println!("  exists:  {}", paths::ARTICLE_INDEX_FILE);
    }

    Ok(())
}
