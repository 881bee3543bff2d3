use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use byline_core::onboarding::{is_writer_publish_enabled, resolve_writer_onboarding_state};
use byline_core::writer::{onboarding_facts, AgreementRecord, WriterProfile};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/writers/:slug/onboarding — onboarding stage from the two
/// existence checks, plus whether publishing is allowed.
pub async fn get_onboarding(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        byline_core::paths::validate_slug(&slug)?;
        let facts = onboarding_facts(&root, &slug);
        let state = resolve_writer_onboarding_state(facts);
        Ok::<_, byline_core::BylineError>(serde_json::json!({
            "slug": slug,
            "has_profile": facts.has_profile,
            "has_agreement": facts.has_agreement,
            "state": state,
            "next_state": state.next(),
            "publish_enabled": is_writer_publish_enabled(state),
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateProfileBody {
    display_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    bio: Option<String>,
}

/// PUT /api/writers/:slug/profile — create the writer profile (first
/// onboarding step).
pub async fn create_profile(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CreateProfileBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let profile =
            WriterProfile::create(&root, &slug, body.display_name, body.email, body.bio)?;
        let json = serde_json::to_value(&profile)?;
        Ok::<_, byline_core::BylineError>(json)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/writers/:slug/profile
pub async fn get_profile(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        byline_core::paths::validate_slug(&slug)?;
        let profile = WriterProfile::load(&root, &slug)?;
        let json = serde_json::to_value(&profile)?;
        Ok::<_, byline_core::BylineError>(json)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct SignAgreementBody {
    full_name: String,
    #[serde(default)]
    checkbox_general: bool,
}

/// POST /api/writers/:slug/agreement — sign the contributor agreement.
pub async fn sign_agreement(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<SignAgreementBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let record = AgreementRecord::sign(&root, &slug, body.full_name, body.checkbox_general)?;
        let state = resolve_writer_onboarding_state(onboarding_facts(&root, &slug));
        Ok::<_, byline_core::BylineError>(serde_json::json!({
            "agreement": record,
            "state": state,
            "publish_enabled": is_writer_publish_enabled(state),
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use byline_core::config::Config;

    fn app(dir: &tempfile::TempDir) -> AppState {
        AppState::new(dir.path().to_path_buf(), Config::new("test-site"))
    }

    #[tokio::test]
    async fn onboarding_for_unknown_writer_is_profile_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let json = get_onboarding(State(app(&dir)), Path("ada".to_string()))
            .await
            .unwrap()
            .0;
        assert_eq!(json["state"], "profile_missing");
        assert_eq!(json["next_state"], "profile_completed");
        assert_eq!(json["publish_enabled"], false);
    }

    #[tokio::test]
    async fn onboarding_rejects_invalid_slug() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = get_onboarding(State(app(&dir)), Path("../etc".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn signing_enables_publishing() {
        let dir = tempfile::TempDir::new().unwrap();
        WriterProfile::create(dir.path(), "ada", "Ada", None, None).unwrap();

        let body = SignAgreementBody {
            full_name: "Ada Lovelace".to_string(),
            checkbox_general: true,
        };
        let json = sign_agreement(State(app(&dir)), Path("ada".to_string()), Json(body))
            .await
            .unwrap()
            .0;
        assert_eq!(json["state"], "agreement_signed");
        assert_eq!(json["publish_enabled"], true);
        assert_eq!(json["agreement"]["full_name"], "Ada Lovelace");
    }
}
