//! HTTP request handlers for the autocomplete endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use glyphdex_core::Suggestion;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::server::AppState;

/// Query string for the suggestion endpoints: the text typed so far.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Query string for the CDN URI endpoints.
#[derive(Debug, Deserialize)]
pub struct CdnQuery {
    #[serde(default)]
    pub q: String,
    /// Release version; the configured asset version when absent.
    pub version: Option<String>,
}

/// Query string for the metadata location endpoint.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub file: String,
}

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Icon-name autocomplete.
///
/// Metadata access can block on disk or network the first time, so the
/// lookup runs on the blocking pool.
pub async fn handle_icons(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Json<Vec<Suggestion>> {
    debug!("icon autocomplete: {:?}", query.q);
    let suggestions = run_blocking(move || state.dex.icon_suggestions(&query.q)).await;
    Json(suggestions)
}

/// Wrapper-class autocomplete.
pub async fn handle_wrapper_classes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Json<Vec<Suggestion>> {
    Json(state.dex.wrapper_class_suggestions(&query.q))
}

/// Wrapper-style autocomplete.
pub async fn handle_wrapper_styles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Json<Vec<Suggestion>> {
    Json(state.dex.wrapper_style_suggestions(&query.q))
}

/// Asset CDN URI autocomplete.
pub async fn handle_asset_cdn_uris(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CdnQuery>,
) -> Json<Vec<Suggestion>> {
    Json(
        state
            .dex
            .asset_cdn_uri_suggestions(&query.q, query.version.as_deref()),
    )
}

/// Metadata CDN URI autocomplete.
pub async fn handle_metadata_cdn_uris(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CdnQuery>,
) -> Json<Vec<Suggestion>> {
    Json(
        state
            .dex
            .metadata_cdn_uri_suggestions(&query.q, query.version.as_deref()),
    )
}

/// Metadata file location under the current settings.
///
/// `location` is null when the settings leave it undetermined, such as
/// kit delivery.
pub async fn handle_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationQuery>,
) -> Json<serde_json::Value> {
    let location = state.dex.locate(&query.file);
    Json(json!({ "location": location }))
}

/// Run a lookup on the blocking pool, degrading to empty output if the
/// task is torn down.
async fn run_blocking<T, F>(task: F) -> T
where
    T: Default + Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(value) => value,
        Err(e) => {
            error!("Blocking lookup failed: {}", e);
            T::default()
        }
    }
}
