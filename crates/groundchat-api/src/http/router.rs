//! Axum router configuration with middleware.
//!
//! One POST route per configured chat route, plus `/health`.
//! Middleware: CORS, tracing.
//!
//! When `server.static_dir` exists, paths outside `/api/` are served from it
//! with unknown paths falling through to `index.html` for client-side
//! routing. Unknown `/api/` paths are always 404.

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::routing::{any, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use groundchat_core::browser::BrowserAutomation;
use groundchat_core::inference::InferenceProvider;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router<I, B>(state: AppState<I, B>) -> Router
where
    I: InferenceProvider,
    B: BrowserAutomation,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let mut router = Router::new();
    for route in &state.config.routes {
        router = router.route(&route.path, post(handlers::chat::chat_turn::<I, B>));
    }

    let mut router = router
        .route("/health", get(health_check))
        .route("/api/{*rest}", any(not_found));

    let static_dir = state.config.server.static_dir.clone();
    router = match static_dir {
        Some(dir) if std::path::Path::new(&dir).exists() => {
            let index_path = format!("{dir}/index.html");
            tracing::info!(path = %dir, "static file serving enabled");
            router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index_path)))
        }
        Some(dir) => {
            tracing::warn!(path = %dir, "static_dir does not exist; serving the API only");
            router.fallback(not_found)
        }
        None => router.fallback(not_found),
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
