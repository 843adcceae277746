//! HTTP server implementation using Axum.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use glyphdex_core::Glyphdex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::handler::{
    handle_asset_cdn_uris, handle_health, handle_icons, handle_location,
    handle_metadata_cdn_uris, handle_wrapper_classes, handle_wrapper_styles,
};

/// Application state shared across handlers.
pub struct AppState {
    /// Core instance (settings, metadata provider, suggestion builders)
    pub dex: Glyphdex,
}

/// Start the autocomplete HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(dex: Glyphdex, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let state = Arc::new(AppState { dex });

    // Permissive CORS: every endpoint is a read-only suggestion lookup
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/autocomplete/icons", get(handle_icons))
        .route("/autocomplete/wrapper-classes", get(handle_wrapper_classes))
        .route("/autocomplete/wrapper-styles", get(handle_wrapper_styles))
        .route("/autocomplete/asset-cdn-uris", get(handle_asset_cdn_uris))
        .route(
            "/autocomplete/metadata-cdn-uris",
            get(handle_metadata_cdn_uris),
        )
        .route("/location", get(handle_location))
        .layer(cors)
        .with_state(state);

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Bind to the address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    // Spawn the server in the background
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
