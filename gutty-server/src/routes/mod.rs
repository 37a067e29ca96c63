use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use gutty_core::api_routes;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    handlers::{
        catalog::{
            filter_options_handler, item_detail_handler, search_handler,
            summary_handler,
        },
        health::{health_handler, ping_handler},
        stats::stats_handler,
        uploads::{
            list_images_handler, serve_upload_handler, upload_image_handler,
        },
    },
    infra::config::CorsConfig,
};

/// Assemble the full application router.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(state.config().dev_mode, &state.config().cors);

    Router::new()
        .route(api_routes::health::PING, get(ping_handler))
        .route(api_routes::health::HEALTH, get(health_handler))
        .merge(catalog_routes())
        .merge(stats_routes())
        .merge(upload_routes(state.config().uploads.max_bytes))
        // Tracing outermost so CORS sees plain axum bodies.
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(api_routes::catalog::SEARCH, get(search_handler))
        .route(api_routes::catalog::FILTERS, get(filter_options_handler))
        .route(api_routes::catalog::SUMMARY, get(summary_handler))
        .route(api_routes::catalog::item::DETAIL, get(item_detail_handler))
        .route(api_routes::catalog::item::IMAGES, get(list_images_handler))
}

fn stats_routes() -> Router<AppState> {
    Router::new()
        .route(api_routes::stats::API, get(stats_handler))
        .route(api_routes::stats::PAGE, get(stats_handler))
}

fn upload_routes(max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            api_routes::catalog::item::UPLOAD,
            post(upload_image_handler).layer(DefaultBodyLimit::max(max_bytes)),
        )
        .route(api_routes::uploads::FILE, get(serve_upload_handler))
}

/// Permissive in dev mode, otherwise restricted to the configured origins.
fn build_cors_layer(dev_mode: bool, cors: &CorsConfig) -> CorsLayer {
    if dev_mode {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
