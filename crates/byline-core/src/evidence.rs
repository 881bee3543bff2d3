//! Badge evidence: one canonical list of published articles per site,
//! reconciled from the build-time article index and the remote document
//! store.
//!
//! Nothing in here fails. A remote document that is not valid evidence maps
//! to `None` and drops out; the worst outcome for a badge report is an
//! undercount.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TARGET: &str = "general";

/// Stand-in publish time for documents with no usable timestamp; sorts oldest.
pub const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00.000Z";

/// Field names consulted for the publish timestamp, highest priority first.
const PUBLISHED_AT_FIELDS: [&str; 4] = ["datePublished", "date", "createdAt", "updatedAt"];

// ---------------------------------------------------------------------------
// BadgeArticleSource
// ---------------------------------------------------------------------------

/// One published article, normalized for badge purposes. `slug` is the
/// merge key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeArticleSource {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// A raw document from the remote store: its id plus untyped field data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub id: String,
    #[serde(default)]
    pub data: Value,
}

// ---------------------------------------------------------------------------
// Remote document mapping
// ---------------------------------------------------------------------------

/// Map a remote document to badge evidence using the default `general`
/// target for fallback URLs.
pub fn map_firestore_article(doc_id: &str, data: &Value) -> Option<BadgeArticleSource> {
    map_firestore_article_with_target(doc_id, data, DEFAULT_TARGET)
}

/// Map a remote document to badge evidence.
///
/// Rules, in order: an explicit `published: false` excludes the document;
/// `slug` falls back to `doc_id`; trimmed `title` and `author` are required;
/// `url` falls back to `/learn/{target}/{slug}`; `published_at` comes from
/// the first usable timestamp field or the Unix epoch; `topic` comes from
/// `topic` then `primaryTopic`.
pub fn map_firestore_article_with_target(
    doc_id: &str,
    data: &Value,
    default_target: &str,
) -> Option<BadgeArticleSource> {
    let Some(fields) = data.as_object() else {
        tracing::debug!(doc_id, "remote document is not an object, skipping");
        return None;
    };

    if fields.get("published") == Some(&Value::Bool(false)) {
        tracing::debug!(doc_id, "remote document explicitly unpublished");
        return None;
    }

    let slug = non_blank(fields.get("slug")).unwrap_or_else(|| doc_id.to_string());

    // Analytics-only documents (page views, read time) share the collection
    // but carry no title/author.
    let (Some(title), Some(author)) = (non_blank(fields.get("title")), non_blank(fields.get("author")))
    else {
        tracing::debug!(doc_id, "remote document missing title or author");
        return None;
    };

    let target = non_blank(fields.get("target"))
        .map(|t| t.to_lowercase())
        .unwrap_or_else(|| default_target.to_lowercase());
    let url = non_blank(fields.get("url")).unwrap_or_else(|| format!("/learn/{target}/{slug}"));

    let published_at = PUBLISHED_AT_FIELDS
        .iter()
        .find_map(|name| fields.get(*name).and_then(timestamp_string))
        .unwrap_or_else(epoch_string);

    let topic = non_blank(fields.get("topic")).or_else(|| non_blank(fields.get("primaryTopic")));

    Some(BadgeArticleSource {
        slug,
        title,
        author,
        url,
        published_at,
        topic,
    })
}

/// Map a batch of remote documents, dropping everything that is not evidence.
pub fn map_remote_documents(docs: &[RemoteDocument], default_target: &str) -> Vec<BadgeArticleSource> {
    docs.iter()
        .filter_map(|doc| map_firestore_article_with_target(&doc.id, &doc.data, default_target))
        .collect()
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Render a timestamp field as a string. Strings pass through untouched,
/// numbers are epoch milliseconds, objects are store timestamps carrying
/// `seconds`/`_seconds` (and optionally `nanoseconds`/`_nanoseconds`).
/// Anything else is unusable and the next field is tried.
fn timestamp_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::<Utc>::from_timestamp_millis(millis).map(format_timestamp)
        }
        Value::Object(obj) => {
            let seconds = obj
                .get("seconds")
                .or_else(|| obj.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::<Utc>::from_timestamp(seconds, u32::try_from(nanos).unwrap_or(0))
                .map(format_timestamp)
        }
        _ => None,
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn epoch_string() -> String {
    EPOCH_TIMESTAMP.to_string()
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge local and remote evidence keyed by slug.
///
/// Local entries go in first, remote entries overwrite on collision. A shared
/// slug keeps its local position but carries the remote content; remote-only
/// entries follow in their original order.
pub fn merge_badge_article_sources(
    local: &[BadgeArticleSource],
    remote: &[BadgeArticleSource],
) -> Vec<BadgeArticleSource> {
    let mut by_slug: IndexMap<String, BadgeArticleSource> = IndexMap::new();
    for article in local.iter().chain(remote) {
        by_slug.insert(article.slug.clone(), article.clone());
    }
    by_slug.into_values().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
