// src/router.rs
//
// Shared by the binary and the integration tests so both run the same
// middleware stack.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_app_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let cors = build_cors_layer(cors_origin)?;

    let api_routes = Router::new()
        .route("/ping", get(handlers::system::ping))
        .route("/seed_data", post(handlers::system::seed_data))
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{code}",
            get(handlers::projects::get_project)
                .put(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        .route(
            "/works",
            get(handlers::works::list_works).post(handlers::works::create_work),
        )
        .route(
            "/works/{id}",
            get(handlers::works::get_work)
                .put(handlers::works::update_work)
                .delete(handlers::works::delete_work),
        )
        .route(
            "/work_types",
            get(handlers::catalog::list_work_types).post(handlers::catalog::create_work_type),
        )
        .route(
            "/executors",
            get(handlers::catalog::list_executors).post(handlers::catalog::create_executor),
        );

    Ok(Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state))
}

/// One allowed origin, credentials on.
pub fn build_cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{origin}': {e}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}
