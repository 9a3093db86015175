// src/handlers/works.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{json::AppJson, path::AppPath},
    models::work::{NewWork, WorkPayload, WorkView},
};

// GET /works
#[utoipa::path(
    get,
    path = "/works",
    tag = "Works",
    responses(
        (status = 200, description = "All works with display fields", body = Vec<WorkView>)
    )
)]
pub async fn list_works(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let works = app_state.work_service.list(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(works)))
}

// GET /works/{id}
#[utoipa::path(
    get,
    path = "/works/{id}",
    tag = "Works",
    params(("id" = i32, Path, description = "Work id")),
    responses(
        (status = 200, description = "Work", body = WorkView),
        (status = 404, description = "Work not found")
    )
)]
pub async fn get_work(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let work = app_state.work_service.get(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(work)))
}

// POST /works
#[utoipa::path(
    post,
    path = "/works",
    tag = "Works",
    request_body = WorkPayload,
    responses(
        (status = 201, description = "Work created", body = WorkView),
        (status = 400, description = "Invalid fields or unknown reference")
    )
)]
pub async fn create_work(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<WorkPayload>,
) -> Result<impl IntoResponse, AppError> {
    let work = NewWork::try_from(payload)?;
    let created = app_state.work_service.create(&app_state.db_pool, work).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /works/{id}
#[utoipa::path(
    put,
    path = "/works/{id}",
    tag = "Works",
    request_body = WorkPayload,
    params(("id" = i32, Path, description = "Work id")),
    responses(
        (status = 200, description = "Work updated", body = WorkView),
        (status = 400, description = "Invalid fields or unknown reference"),
        (status = 404, description = "Work not found")
    )
)]
pub async fn update_work(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<WorkPayload>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state
        .work_service
        .update(&app_state.db_pool, id, payload)
        .await?;
    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /works/{id}
#[utoipa::path(
    delete,
    path = "/works/{id}",
    tag = "Works",
    params(("id" = i32, Path, description = "Work id")),
    responses(
        (status = 204, description = "Work deleted"),
        (status = 404, description = "Work not found")
    )
)]
pub async fn delete_work(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.work_service.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
