// src/handlers/system.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{common::error::AppError, config::AppState, services::seed_service::SeedSummary};

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedResponse {
    #[schema(example = "Database seeded successfully")]
    pub message: String,
    pub summary: SeedSummary,
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "System",
    responses((status = 200, description = "Liveness check", body = String))
)]
pub async fn ping() -> &'static str {
    "pong"
}

/// Destructive: replaces every row in the database with demo data.
#[utoipa::path(
    post,
    path = "/seed_data",
    tag = "System",
    responses(
        (status = 201, description = "Database wiped and reseeded", body = SeedResponse),
        (status = 500, description = "Seeding failed, previous data kept")
    )
)]
pub async fn seed_data(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.seed_service.seed(&app_state.db_pool).await?;

    Ok((
        StatusCode::CREATED,
        Json(SeedResponse {
            message: "Database seeded successfully".to_string(),
            summary,
        }),
    ))
}
