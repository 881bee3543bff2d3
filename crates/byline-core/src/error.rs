use thiserror::Error;

#[derive(Debug, Error)]
pub enum BylineError {
    #[error("not initialized: run 'byline init'")]
    NotInitialized,

    #[error("writer not found: {0}")]
    WriterNotFound(String),

    #[error("writer already exists: {0}")]
    WriterExists(String),

    #[error("agreement not found for writer: {0}")]
    AgreementNotFound(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid onboarding state: {0}")]
    InvalidOnboardingState(String),

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("agreement rejected for '{slug}': {reason}")]
    AgreementRejected { slug: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BylineError>;
