use axum::extract::{Path, State};
use axum::Json;
use byline_core::badges::{award_badges, evidence_for_author};
use byline_core::content::load_local_index;
use byline_core::evidence::{map_remote_documents, merge_badge_article_sources, RemoteDocument};
use byline_core::writer::writer_slug_lookup;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct BadgeEvidenceBody {
    /// Raw documents fetched from the remote article collection.
    #[serde(default)]
    documents: Vec<RemoteDocument>,
}

/// POST /api/writers/:slug/badges — merge the local article index with the
/// supplied remote documents, keep the writer's articles and award badges.
pub async fn badge_evidence(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<BadgeEvidenceBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let config = app.config.clone();
    let result = tokio::task::spawn_blocking(move || {
        byline_core::paths::validate_slug(&slug)?;

        let local = load_local_index(&root)?;
        let remote = map_remote_documents(&body.documents, &config.articles.default_target);
        let merged = merge_badge_article_sources(&local, &remote);

        let lookup = writer_slug_lookup(&root)?;
        let evidence = evidence_for_author(&merged, &slug, &lookup);
        let report = award_badges(&slug, &config.badges.tiers, &evidence);

        tracing::debug!(
            slug = %slug,
            local = local.len(),
            remote_documents = body.documents.len(),
            remote_evidence = remote.len(),
            evidence = evidence.len(),
            "badge evidence computed"
        );

        Ok::<_, byline_core::BylineError>(serde_json::json!({
            "slug": slug,
            "articles": evidence,
            "report": report,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
