//! Aegis API - user authentication REST server
//!
//! Exposes four endpoints over the authentication core: register an
//! account, log in for a bearer token, fetch the authenticated profile,
//! and log out. Swagger UI and the OpenAPI document are served alongside.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::http::HeaderValue;
use axum::{middleware as axum_middleware, routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the authentication API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register_handler,
        handlers::auth::login_handler,
        handlers::auth::show_handler,
        handlers::auth::logout_handler,
        handlers::health::health_check,
    ),
    components(schemas(
        auth::service::RegisterRequest,
        auth::service::LoginRequest,
        handlers::auth::RegisterResponse,
        handlers::auth::LoginResponse,
        handlers::auth::ProfileData,
        handlers::auth::ProfileResponse,
        handlers::auth::LogoutResponse,
        handlers::health::HealthResponse,
        error::ErrorResponse,
        error::ValidationErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "User registration and session endpoints"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by the protected endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(routes::api_routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if state.config.server.cors_enabled && !state.config.server.cors_origins.is_empty() {
        let origins: Vec<HeaderValue> = state
            .config
            .server
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        router = router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
        .layer(axum_middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router wired to a fresh in-memory store, for integration tests.
///
/// Uses the default JWT configuration so tests can mint tokens against a
/// known secret.
#[cfg(feature = "test-utils")]
pub fn create_router_for_testing() -> Router {
    create_router(Arc::new(AppState::for_testing()))
}
