//! Application route configuration.
//!
//! Cross-cutting checks (token guard, rate limiting) are composed here at
//! route-registration time as explicit middleware layers.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    analytics_routes, auth_routes, customer_routes, employee_routes, order_routes,
    product_routes, production_routes,
};
use super::middleware::{auth_middleware, rate_limit_auth_middleware, rate_limit_middleware};
use super::openapi::ApiDoc;
use super::AppState;
use crate::types::MessageResponse;

/// Attach the token guard and the general rate-limit tier to a resource
/// router.
fn protected(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
}

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness endpoints (no rate limiting)
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth routes: login is public, the rest carries its own guard;
        // the stricter rate-limit tier covers them all
        .nest(
            "/auth",
            auth_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_auth_middleware,
            )),
        )
        // Protected resource routes
        .nest("/employees", protected(employee_routes(), &state))
        .nest("/products", protected(product_routes(), &state))
        .nest("/customers", protected(customer_routes(), &state))
        .nest("/orders", protected(order_routes(), &state))
        .nest("/production", protected(production_routes(), &state))
        .nest("/analytics", protected(analytics_routes(), &state))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Landing banner
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Welcome to the Factory Management System!",
    ))
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint with database connectivity probe
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (StatusCode::OK, Json(HealthResponse { status: "healthy" })),
        Err(e) => {
            tracing::error!("Health check database ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "degraded" }),
            )
        }
    }
}
