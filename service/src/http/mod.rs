//! HTTP server assembly shared by `main.rs` and the integration tests.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{self, ApiDoc};
use crate::build_info::BuildInfo;
use crate::catalog::Catalog;
use crate::config::Config;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Build the CORS layer for the configured origins.
///
/// `"*"` anywhere in the list allows any origin; an empty list blocks all
/// cross-origin requests.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin: AllowOrigin = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?origins, "CORS allowed origins configured");
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}

/// The full application router, wired exactly as in production.
///
/// Layer order, inside out: routes, extensions, CORS, request tracing.
pub fn app(config: &Config, catalog: Arc<Catalog>, build_info: BuildInfo) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api::router());

    if config.swagger.enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app.layer(Extension(catalog))
        .layer(Extension(build_info))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors.allowed_origins)),
        )
}
