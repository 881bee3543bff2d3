use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config — read-only view of the loaded `.byline/config.yaml`,
/// with validation warnings. The admin allowlist is not exposed.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let mut json = serde_json::to_value(app.config.as_ref())?;
    if let Some(obj) = json.as_object_mut() {
        obj.remove("admin_emails");
        obj.insert(
            "warnings".to_string(),
            serde_json::to_value(app.config.validate())?,
        );
    }
    Ok(Json(json))
}
