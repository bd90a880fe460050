//! Test app builder that mirrors main.rs wiring with injectable fixtures.
//!
//! This module provides a [`TestAppBuilder`] that constructs an Axum router matching
//! the production configuration in `http::app`, but with the ability to pick a
//! fixture seed, a votos cache size and a subset of routes.
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_full_app() {
//!     let app = TestAppBuilder::new()
//!         .with_rest()
//!         .with_seed(7)
//!         .with_cors(&["http://localhost:3000"])
//!         .build();
//!
//!     // Use app.oneshot(...) to send requests
//! }
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::minimal()`] - Health check only
//! - [`TestAppBuilder::rest_only()`] - `/api/v1` routes without CORS or Swagger
//! - [`TestAppBuilder::full()`] - Everything `main.rs` mounts

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use memoria_civica_api::{
    api::{self, ApiDoc},
    build_catalog,
    build_info::BuildInfo,
    catalog::Catalog,
    config::FixturesConfig,
    http::{cors_layer, health_check},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builder for test applications that mirrors main.rs wiring.
pub struct TestAppBuilder {
    /// Whether to include REST API routes
    include_rest: bool,
    /// Whether to include health check route
    include_health: bool,
    /// Whether to include Swagger UI
    include_swagger: bool,
    /// Custom build info (None uses from_env())
    build_info: Option<BuildInfo>,
    /// Fixture generation settings
    fixtures: FixturesConfig,
    /// CORS allowed origins (None means no CORS layer)
    cors_origins: Option<Vec<String>>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_rest: false,
            include_health: false,
            include_swagger: false,
            build_info: None,
            fixtures: FixturesConfig::default(),
            cors_origins: None,
        }
    }

    // =========================================================================
    // Preset Builders
    // =========================================================================

    /// Create a minimal app with only the health check endpoint.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new().with_health()
    }

    /// Create an app with the `/api/v1` routes only.
    #[must_use]
    pub fn rest_only() -> Self {
        Self::new().with_rest()
    }

    /// Create a full app: all routes, Swagger and CORS.
    #[must_use]
    pub fn full() -> Self {
        Self::new()
            .with_rest()
            .with_health()
            .with_swagger()
            .with_cors(&["http://localhost:3000"])
    }

    // =========================================================================
    // Component Configuration
    // =========================================================================

    /// Include REST API routes (/api/v1/*).
    #[must_use]
    pub fn with_rest(mut self) -> Self {
        self.include_rest = true;
        self
    }

    /// Include health check route (/health).
    #[must_use]
    pub fn with_health(mut self) -> Self {
        self.include_health = true;
        self
    }

    /// Include Swagger UI (/swagger-ui).
    #[must_use]
    pub fn with_swagger(mut self) -> Self {
        self.include_swagger = true;
        self
    }

    /// Generate fixtures from a specific seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.fixtures.seed = seed;
        self
    }

    /// Bound the votos cache to `capacity` votações.
    #[must_use]
    pub fn with_votos_cache_capacity(mut self, capacity: u64) -> Self {
        self.fixtures.votos_cache_capacity = capacity;
        self
    }

    /// Configure CORS with specific allowed origins.
    ///
    /// Pass an empty slice to block all cross-origin requests.
    /// Pass `&["*"]` to allow any origin.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = Some(origins.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Use custom build info.
    #[must_use]
    pub fn with_build_info(mut self, info: BuildInfo) -> Self {
        self.build_info = Some(info);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the Axum router.
    #[must_use]
    pub fn build(self) -> Router {
        self.build_with_catalog().0
    }

    /// Build the router and also return the catalog it serves.
    ///
    /// The layer ordering matches `http::app`:
    /// 1. Routes (REST, Swagger, Health)
    /// 2. Extensions (catalog, build info)
    /// 3. CORS layer
    #[must_use]
    pub fn build_with_catalog(self) -> (Router, Arc<Catalog>) {
        let build_info = self.build_info.unwrap_or_else(BuildInfo::from_env);
        let catalog = build_catalog(&self.fixtures);

        let mut app = Router::new();

        if self.include_rest {
            app = app.nest("/api/v1", api::router());
        }

        if self.include_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        if self.include_health {
            app = app.route("/health", get(health_check));
        }

        app = app
            .layer(Extension(Arc::clone(&catalog)))
            .layer(Extension(build_info));

        if let Some(origins) = self.cors_origins {
            app = app.layer(cors_layer(&origins));
        }

        (app, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_minimal_builder_creates_health_route() {
        let app = TestAppBuilder::minimal().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_minimal_builder_has_no_rest_routes() {
        let app = TestAppBuilder::minimal().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/deputados")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
