// src/handlers/catalog.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::json::AppJson,
    models::catalog::{Executor, ExecutorPayload, WorkType, WorkTypePayload},
};

// =============================================================================
//  WORK TYPES
// =============================================================================

#[utoipa::path(
    get,
    path = "/work_types",
    tag = "Catalog",
    responses(
        (status = 200, description = "Work types ordered by their sequence", body = Vec<WorkType>)
    )
)]
pub async fn list_work_types(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let work_types = app_state
        .catalog_service
        .list_work_types(&app_state.db_pool)
        .await?;
    Ok((StatusCode::OK, Json(work_types)))
}

#[utoipa::path(
    post,
    path = "/work_types",
    tag = "Catalog",
    request_body = WorkTypePayload,
    responses(
        (status = 201, description = "Work type created", body = WorkType),
        (status = 400, description = "Invalid fields or duplicate name")
    )
)]
pub async fn create_work_type(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<WorkTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let work_type = app_state
        .catalog_service
        .create_work_type(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(work_type)))
}

// =============================================================================
//  EXECUTORS
// =============================================================================

#[utoipa::path(
    get,
    path = "/executors",
    tag = "Catalog",
    responses(
        (status = 200, description = "Executors ordered by name", body = Vec<Executor>)
    )
)]
pub async fn list_executors(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let executors = app_state
        .catalog_service
        .list_executors(&app_state.db_pool)
        .await?;
    Ok((StatusCode::OK, Json(executors)))
}

#[utoipa::path(
    post,
    path = "/executors",
    tag = "Catalog",
    request_body = ExecutorPayload,
    responses(
        (status = 201, description = "Executor created", body = Executor),
        (status = 400, description = "Invalid fields or duplicate name")
    )
)]
pub async fn create_executor(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<ExecutorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let executor = app_state
        .catalog_service
        .create_executor(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(executor)))
}
