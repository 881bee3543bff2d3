pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use byline_core::config::Config;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Config
        .route("/api/config", get(routes::config::get_config))
        // Writers
        .route(
            "/api/writers/{slug}/onboarding",
            get(routes::writers::get_onboarding),
        )
        .route(
            "/api/writers/{slug}/profile",
            get(routes::writers::get_profile).put(routes::writers::create_profile),
        )
        .route(
            "/api/writers/{slug}/agreement",
            post(routes::writers::sign_agreement),
        )
        .route(
            "/api/writers/{slug}/badges",
            post(routes::badges::badge_evidence),
        )
        // Agreement
        .route(
            "/api/agreement/resolve",
            post(routes::agreement::resolve_agreement),
        )
        // Admin
        .route("/api/admin/writers", get(routes::admin::list_writers))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Load the project config and serve the API on `port`.
pub async fn serve(root: PathBuf, port: u16) -> anyhow::Result<()> {
    let config = Config::load(&root)?;
    for warning in config.validate() {
        tracing::warn!(level = ?warning.level, "{}", warning.message);
    }

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, config, listener).await
}

/// Serve on a pre-bound listener so the caller can read the actual port
/// first (useful when `port = 0`).
pub async fn serve_on(
    root: PathBuf,
    config: Config,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let site = config.site.name.clone();
    let app = build_router(state::AppState::new(root, config));

    tracing::info!(site = %site, "byline API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
