use axum::http::StatusCode;
use byline_core::config::Config;
use byline_core::evidence::BadgeArticleSource;
use byline_server::state::AppState;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ADMIN: &str = "editor@example.com";

fn router(dir: &TempDir) -> axum::Router {
    let config = Config::new("test-site").with_admins([ADMIN]);
    byline_server::build_router(AppState::new(dir.path().to_path_buf(), config))
}

async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = axum::http::Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, &[], None).await
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, &[], Some(body)).await
}

async fn put_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, &[], Some(body)).await
}

// ---------------------------------------------------------------------------
// Onboarding flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn onboarding_walks_through_all_states() {
    let dir = TempDir::new().unwrap();

    let (status, json) = get(router(&dir), "/api/writers/ada/onboarding").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "profile_missing");
    assert_eq!(json["publish_enabled"], false);

    let (status, json) = put_json(
        router(&dir),
        "/api/writers/ada/profile",
        serde_json::json!({ "display_name": "Ada Lovelace", "email": "ada@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["slug"], "ada");

    let (_, json) = get(router(&dir), "/api/writers/ada/onboarding").await;
    assert_eq!(json["state"], "profile_completed");
    assert_eq!(json["has_profile"], true);
    assert_eq!(json["has_agreement"], false);

    let (status, json) = post_json(
        router(&dir),
        "/api/writers/ada/agreement",
        serde_json::json!({ "full_name": "Ada Lovelace", "checkbox_general": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "agreement_signed");

    let (_, json) = get(router(&dir), "/api/writers/ada/onboarding").await;
    assert_eq!(json["state"], "agreement_signed");
    assert_eq!(json["publish_enabled"], true);
    assert_eq!(json["next_state"], serde_json::Value::Null);
}

#[tokio::test]
async fn duplicate_profile_returns_409() {
    let dir = TempDir::new().unwrap();
    let body = serde_json::json!({ "display_name": "Ada" });
    let (status, _) = put_json(router(&dir), "/api/writers/ada/profile", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, json) = put_json(router(&dir), "/api/writers/ada/profile", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("ada"));
}

#[tokio::test]
async fn missing_profile_returns_404() {
    let dir = TempDir::new().unwrap();
    let (status, _) = get(router(&dir), "/api/writers/ghost/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn agreement_without_profile_returns_422() {
    let dir = TempDir::new().unwrap();
    let (status, _) = post_json(
        router(&dir),
        "/api/writers/ada/agreement",
        serde_json::json!({ "full_name": "Ada", "checkbox_general": true }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_slug_returns_400() {
    let dir = TempDir::new().unwrap();
    let (status, _) = get(router(&dir), "/api/writers/Not_A_Slug/onboarding").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Badge evidence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn badge_evidence_merges_and_filters_by_author() {
    let dir = TempDir::new().unwrap();
    byline_core::writer::WriterProfile::create(dir.path(), "jose-nunez", "José Núñez", None, None)
        .unwrap();
    let local = vec![
        BadgeArticleSource {
            slug: "a".into(),
            title: "Old".into(),
            author: "José Núñez".into(),
            url: "/u".into(),
            published_at: "2025-01-01".into(),
            topic: None,
        },
        BadgeArticleSource {
            slug: "other".into(),
            title: "Someone else".into(),
            author: "Grace Hopper".into(),
            url: "/o".into(),
            published_at: "2025-01-05".into(),
            topic: None,
        },
    ];
    byline_core::content::save_local_index(dir.path(), &local).unwrap();

    let (status, json) = post_json(
        router(&dir),
        "/api/writers/jose-nunez/badges",
        serde_json::json!({
            "documents": [
                { "id": "a", "data": { "title": "New", "author": "José Núñez", "url": "/u", "datePublished": "2025-02-01" } },
                { "id": "b", "data": { "title": "Second", "author": "josé  núñez", "target": "Founders" } },
                { "id": "views", "data": { "pageViews": 500, "avgTimeOnPage": 30 } },
                { "id": "c", "data": { "title": "Draft", "author": "José Núñez", "published": false } },
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let articles = json["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["slug"], "a");
    assert_eq!(articles[0]["title"], "New");
    assert_eq!(articles[0]["publishedAt"], "2025-02-01");
    assert_eq!(articles[1]["url"], "/learn/founders/b");
    assert_eq!(articles[1]["publishedAt"], "1970-01-01T00:00:00.000Z");

    assert_eq!(json["report"]["article_count"], 2);
    assert_eq!(json["report"]["next"]["id"], "five-articles");
}

#[tokio::test]
async fn badge_evidence_without_any_sources_is_empty() {
    let dir = TempDir::new().unwrap();
    let (status, json) = post_json(
        router(&dir),
        "/api/writers/nobody/badges",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["report"]["article_count"], 0);
    assert!(json["articles"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Agreement resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn agreement_resolution_follows_remote_then_cache() {
    let dir = TempDir::new().unwrap();
    let cases = [
        (serde_json::json!({ "has_agreement": false, "agreement": { "checkbox_general": true } }), false),
        (serde_json::json!({ "has_agreement": true, "agreement": null }), true),
        (serde_json::json!({ "has_agreement": null, "agreement": { "agreed": true } }), true),
        (serde_json::json!({ "has_agreement": null, "agreement": "signed" }), false),
    ];
    for (body, expected) in cases {
        let (status, json) = post_json(router(&dir), "/api/agreement/resolve", body.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["accepted"], expected, "body: {body}");
    }
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_listing_requires_allowlisted_email() {
    let dir = TempDir::new().unwrap();
    byline_core::writer::WriterProfile::create(dir.path(), "ada", "Ada", None, None).unwrap();

    let (status, _) = get(router(&dir), "/api/admin/writers").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        router(&dir),
        "GET",
        "/api/admin/writers",
        &[("x-user-email", "ada@example.com")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(
        router(&dir),
        "GET",
        "/api/admin/writers",
        &[("x-user-email", "Editor@Example.com")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["state"], "profile_completed");
}

#[tokio::test]
async fn get_config_returns_site() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(router(&dir), "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["site"]["name"], "test-site");
    assert_eq!(json["articles"]["default_target"], "general");
}
