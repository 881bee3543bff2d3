use crate::badges::{default_tiers, BadgeTier};
use crate::error::{BylineError, Result};
use crate::evidence::DEFAULT_TARGET;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ArticlesConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlesConfig {
    /// Audience segment used in `/learn/{target}/{slug}` when a remote
    /// document names none.
    #[serde(default = "default_target")]
    pub default_target: String,
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            default_target: default_target(),
        }
    }
}

// ---------------------------------------------------------------------------
// BadgesConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgesConfig {
    #[serde(default = "default_tiers")]
    pub tiers: Vec<BadgeTier>,
}

impl Default for BadgesConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub site: SiteConfig,
    /// Accounts allowed into the admin dashboard.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_emails: Vec<String>,
    #[serde(default)]
    pub articles: ArticlesConfig,
    #[serde(default)]
    pub badges: BadgesConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            site: SiteConfig {
                name: site_name.into(),
                description: None,
            },
            admin_emails: Vec::new(),
            articles: ArticlesConfig::default(),
            badges: BadgesConfig::default(),
        }
    }

    pub fn with_admins<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admin_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive membership in the admin allowlist.
    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.trim();
        !email.is_empty()
            && self
                .admin_emails
                .iter()
                .any(|admin| admin.trim().eq_ignore_ascii_case(email))
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(BylineError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for email in &self.admin_emails {
            if !looks_like_email(email) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("admin_emails entry '{email}' is not an email address"),
                });
            }
        }

        if !paths::is_valid_slug(&self.articles.default_target) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "articles.default_target '{}' is not a valid url segment",
                    self.articles.default_target
                ),
            });
        }

        let mut seen = HashSet::new();
        for tier in &self.badges.tiers {
            if !seen.insert(tier.id.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("badge tier '{}' is defined more than once", tier.id),
                });
            }
            if tier.min_articles == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "badge tier '{}' has min_articles=0 and is awarded to everyone",
                        tier.id
                    ),
                });
            }
        }

        warnings
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
