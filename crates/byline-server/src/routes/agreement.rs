use axum::Json;
use byline_core::agreement::{resolve_agreement_accepted_value, RemoteAgreement};

#[derive(serde::Deserialize)]
pub struct ResolveAgreementBody {
    /// `null` until the authoritative store has been checked.
    #[serde(default)]
    has_agreement: RemoteAgreement,
    /// Locally cached snapshot; any JSON shape is accepted.
    #[serde(default)]
    agreement: serde_json::Value,
}

/// POST /api/agreement/resolve — one accepted/not-accepted answer for the
/// account settings view.
pub async fn resolve_agreement(Json(body): Json<ResolveAgreementBody>) -> Json<serde_json::Value> {
    let accepted = resolve_agreement_accepted_value(body.has_agreement, &body.agreement);
    Json(serde_json::json!({ "accepted": accepted }))
}
