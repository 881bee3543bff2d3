use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// WriterOnboardingState
// ---------------------------------------------------------------------------

/// Where a contributor is in onboarding. Recomputed from [`OnboardingFacts`]
/// on every request and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriterOnboardingState {
    ProfileMissing,
    ProfileCompleted,
    AgreementSigned,
}

impl WriterOnboardingState {
    pub fn all() -> &'static [WriterOnboardingState] {
        &[
            WriterOnboardingState::ProfileMissing,
            WriterOnboardingState::ProfileCompleted,
            WriterOnboardingState::AgreementSigned,
        ]
    }

    pub fn next(self) -> Option<WriterOnboardingState> {
        Self::all().get(self as usize + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WriterOnboardingState::ProfileMissing => "profile_missing",
            WriterOnboardingState::ProfileCompleted => "profile_completed",
            WriterOnboardingState::AgreementSigned => "agreement_signed",
        }
    }
}

impl fmt::Display for WriterOnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WriterOnboardingState {
    type Err = crate::error::BylineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile_missing" => Ok(WriterOnboardingState::ProfileMissing),
            "profile_completed" => Ok(WriterOnboardingState::ProfileCompleted),
            "agreement_signed" => Ok(WriterOnboardingState::AgreementSigned),
            _ => Err(crate::error::BylineError::InvalidOnboardingState(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// The two independent facts onboarding is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingFacts {
    pub has_profile: bool,
    pub has_agreement: bool,
}

/// A profile gates everything; an agreement only counts once a profile exists.
pub fn resolve_writer_onboarding_state(facts: OnboardingFacts) -> WriterOnboardingState {
    match (facts.has_profile, facts.has_agreement) {
        (false, _) => WriterOnboardingState::ProfileMissing,
        (true, false) => WriterOnboardingState::ProfileCompleted,
        (true, true) => WriterOnboardingState::AgreementSigned,
    }
}

/// The only gate for publishing.
pub fn is_writer_publish_enabled(state: WriterOnboardingState) -> bool {
    state == WriterOnboardingState::AgreementSigned
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
