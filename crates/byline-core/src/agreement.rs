//! Whether a contributor has accepted the agreement, from the authoritative
//! remote flag and a possibly stale local snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// RemoteAgreement
// ---------------------------------------------------------------------------

/// Tri-state remote fact. `Unknown` means the authoritative store has not
/// been checked yet, which is not the same as `Missing`.
///
/// On the wire this is `null`, `true` or `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum RemoteAgreement {
    #[default]
    Unknown,
    Signed,
    Missing,
}

impl From<Option<bool>> for RemoteAgreement {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => RemoteAgreement::Unknown,
            Some(true) => RemoteAgreement::Signed,
            Some(false) => RemoteAgreement::Missing,
        }
    }
}

impl From<RemoteAgreement> for Option<bool> {
    fn from(value: RemoteAgreement) -> Self {
        match value {
            RemoteAgreement::Unknown => None,
            RemoteAgreement::Signed => Some(true),
            RemoteAgreement::Missing => Some(false),
        }
    }
}

// ---------------------------------------------------------------------------
// AgreementSnapshot
// ---------------------------------------------------------------------------

/// Locally cached agreement state. `agreed` is the legacy field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox_general: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreed: Option<bool>,
}

impl AgreementSnapshot {
    /// Read a snapshot out of arbitrary JSON. Only objects produce one;
    /// fields that are not booleans are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            checkbox_general: obj.get("checkbox_general").and_then(Value::as_bool),
            agreed: obj.get("agreed").and_then(Value::as_bool),
        })
    }

    pub fn is_accepted(&self) -> bool {
        self.checkbox_general == Some(true) || self.agreed == Some(true)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// A known remote fact always wins, including revoking a stale positive
/// local snapshot. Only while the remote is `Unknown` does the snapshot count.
pub fn resolve_agreement_accepted(
    remote: RemoteAgreement,
    snapshot: Option<&AgreementSnapshot>,
) -> bool {
    match remote {
        RemoteAgreement::Missing => false,
        RemoteAgreement::Signed => true,
        RemoteAgreement::Unknown => snapshot.is_some_and(AgreementSnapshot::is_accepted),
    }
}

/// [`resolve_agreement_accepted`] over an untyped cached value.
pub fn resolve_agreement_accepted_value(remote: RemoteAgreement, agreement: &Value) -> bool {
    let snapshot = AgreementSnapshot::from_value(agreement);
    resolve_agreement_accepted(remote, snapshot.as_ref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
