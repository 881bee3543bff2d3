use crate::author::{build_writer_slug_lookup, WriterLike, WriterSlugLookup};
use crate::error::{BylineError, Result};
use crate::onboarding::{resolve_writer_onboarding_state, OnboardingFacts, WriterOnboardingState};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version stamp written into every signed agreement.
pub const AGREEMENT_VERSION: &str = "2025-01";

// ---------------------------------------------------------------------------
// WriterProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriterProfile {
    pub slug: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WriterProfile {
    pub fn new(slug: impl Into<String>, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            display_name: display_name.into(),
            email: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn create(
        root: &Path,
        slug: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        bio: Option<String>,
    ) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(BylineError::InvalidProfile(
                "display_name must not be empty".to_string(),
            ));
        }

        if Self::exists(root, &slug) {
            return Err(BylineError::WriterExists(slug));
        }

        let mut profile = Self::new(slug, display_name);
        profile.email = email.filter(|e| !e.trim().is_empty());
        profile.bio = bio.filter(|b| !b.trim().is_empty());
        profile.save(root)?;
        tracing::info!(slug = %profile.slug, "writer profile created");
        Ok(profile)
    }

    pub fn exists(root: &Path, slug: &str) -> bool {
        paths::profile_path(root, slug).is_file()
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let path = paths::profile_path(root, slug);
        if !path.exists() {
            return Err(BylineError::WriterNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&path)?;
        let profile: WriterProfile = serde_yaml::from_str(&data)?;
        Ok(profile)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::profile_path(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// All stored profiles, ordered by slug.
    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let writers_dir = paths::writers_dir(root);
        if !writers_dir.exists() {
            return Ok(Vec::new());
        }

        let mut profiles = Vec::new();
        for entry in std::fs::read_dir(&writers_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let slug = entry.file_name().to_string_lossy().into_owned();
                match Self::load(root, &slug) {
                    Ok(p) => profiles.push(p),
                    Err(BylineError::WriterNotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        profiles.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(profiles)
    }

    pub fn as_writer_like(&self) -> WriterLike {
        WriterLike::new(self.display_name.clone(), self.slug.clone())
    }
}

// ---------------------------------------------------------------------------
// AgreementRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementRecord {
    pub slug: String,
    pub full_name: String,
    pub checkbox_general: bool,
    pub version: String,
    pub signed_at: DateTime<Utc>,
}

impl AgreementRecord {
    /// Sign the contributor agreement. Requires an existing profile and the
    /// general checkbox ticked. Re-signing replaces the previous record.
    pub fn sign(
        root: &Path,
        slug: &str,
        full_name: impl Into<String>,
        checkbox_general: bool,
    ) -> Result<Self> {
        paths::validate_slug(slug)?;
        if !WriterProfile::exists(root, slug) {
            return Err(BylineError::AgreementRejected {
                slug: slug.to_string(),
                reason: "profile must be completed first".to_string(),
            });
        }
        if !checkbox_general {
            return Err(BylineError::AgreementRejected {
                slug: slug.to_string(),
                reason: "general terms were not accepted".to_string(),
            });
        }
        let full_name = full_name.into().trim().to_string();
        if full_name.is_empty() {
            return Err(BylineError::AgreementRejected {
                slug: slug.to_string(),
                reason: "full_name must not be empty".to_string(),
            });
        }

        let record = Self {
            slug: slug.to_string(),
            full_name,
            checkbox_general,
            version: AGREEMENT_VERSION.to_string(),
            signed_at: Utc::now(),
        };
        let data = serde_yaml::to_string(&record)?;
        crate::io::atomic_write(&paths::agreement_path(root, slug), data.as_bytes())?;
        tracing::info!(slug, version = AGREEMENT_VERSION, "agreement signed");
        Ok(record)
    }

    pub fn exists(root: &Path, slug: &str) -> bool {
        paths::agreement_path(root, slug).is_file()
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let path = paths::agreement_path(root, slug);
        if !path.exists() {
            return Err(BylineError::AgreementNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&path)?;
        let record: AgreementRecord = serde_yaml::from_str(&data)?;
        Ok(record)
    }

    /// Remove a signed agreement. Returns false if none was on file.
    pub fn revoke(root: &Path, slug: &str) -> Result<bool> {
        let path = paths::agreement_path(root, slug);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        tracing::warn!(slug, "agreement revoked");
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Onboarding facts
// ---------------------------------------------------------------------------

/// Two independent existence checks; nothing else is consulted.
pub fn onboarding_facts(root: &Path, slug: &str) -> OnboardingFacts {
    OnboardingFacts {
        has_profile: WriterProfile::exists(root, slug),
        has_agreement: AgreementRecord::exists(root, slug),
    }
}

pub fn onboarding_state(root: &Path, slug: &str) -> WriterOnboardingState {
    resolve_writer_onboarding_state(onboarding_facts(root, slug))
}

/// Author lookup over every stored profile, in slug order.
pub fn writer_slug_lookup(root: &Path) -> Result<WriterSlugLookup> {
    let writers: Vec<WriterLike> = WriterProfile::list(root)?
        .iter()
        .map(WriterProfile::as_writer_like)
        .collect();
    Ok(build_writer_slug_lookup(&writers))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
