//! Top-level router: health checks, domain routes and HTTP layers

use super::entity_registry::EntityRegistry;
use crate::config::CorsConfig;
use axum::http::HeaderValue;
use axum::response::Json;
use axum::{Router, routing::get};
use serde_json::{Value, json};
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `/health` and `/healthz`, outside the API prefix
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// CORS layer for the configured origins; any origin when none are listed
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Health checks plus the domain routes under `api_prefix`
///
/// A root prefix merges the domain routes instead of nesting them.
pub fn api_routes(registry: &EntityRegistry, api_prefix: &str) -> Router {
    let prefix = api_prefix.trim_end_matches('/');
    if prefix.is_empty() {
        health_routes().merge(registry.build_routes())
    } else {
        health_routes().nest(prefix, registry.build_routes())
    }
}

/// Wrap routes with CORS, tracing and trailing-slash normalization
///
/// Normalization runs before routing: the layered router is the fallback
/// service of an otherwise empty one.
pub fn with_layers(routes: Router, cors: &CorsConfig) -> Router {
    let routes = routes
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http());
    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(routes))
}

/// Assemble the application router
pub fn build_router(registry: &EntityRegistry, api_prefix: &str, cors: &CorsConfig) -> Router {
    with_layers(api_routes(registry, api_prefix), cors)
}
