use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use byline_core::onboarding::{is_writer_publish_enabled, resolve_writer_onboarding_state};
use byline_core::writer::{onboarding_facts, WriterProfile};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the signed-in account's email. Set by the auth layer in
/// front of this service.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Check the caller against the configured admin allowlist.
pub fn require_admin(app: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    let email = headers
        .get(USER_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::forbidden("admin access requires a signed-in account"))?;

    if !app.is_admin(email) {
        tracing::warn!(email, "admin access denied");
        return Err(AppError::forbidden(format!("'{email}' is not an admin")));
    }
    Ok(email.to_string())
}

/// GET /api/admin/writers — every writer with their onboarding stage.
pub async fn list_writers(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&app, &headers)?;

    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let profiles = WriterProfile::list(&root)?;
        let list: Vec<serde_json::Value> = profiles
            .iter()
            .map(|p| {
                let facts = onboarding_facts(&root, &p.slug);
                let state = resolve_writer_onboarding_state(facts);
                serde_json::json!({
                    "slug": p.slug,
                    "display_name": p.display_name,
                    "email": p.email,
                    "state": state,
                    "publish_enabled": is_writer_publish_enabled(state),
                    "created_at": p.created_at,
                })
            })
            .collect();
        Ok::<_, byline_core::BylineError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use byline_core::config::Config;

    fn headers(email: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(USER_EMAIL_HEADER, HeaderValue::from_str(email).unwrap());
        h
    }

    fn app(admins: &[&str]) -> AppState {
        AppState::new(
            std::path::PathBuf::from("/tmp/unused"),
            Config::new("blog").with_admins(admins.iter().copied()),
        )
    }

    #[test]
    fn allowlisted_email_passes() {
        let email = require_admin(&app(&["ed@example.com"]), &headers("Ed@Example.com")).unwrap();
        assert_eq!(email, "Ed@Example.com");
    }

    #[test]
    fn other_email_is_rejected() {
        assert!(require_admin(&app(&["ed@example.com"]), &headers("ada@example.com")).is_err());
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(require_admin(&app(&["ed@example.com"]), &HeaderMap::new()).is_err());
    }

    #[test]
    fn allowlist_varies_per_state() {
        let h = headers("ada@example.com");
        assert!(require_admin(&app(&[]), &h).is_err());
        assert!(require_admin(&app(&["ada@example.com"]), &h).is_ok());
    }
}
