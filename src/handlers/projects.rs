// src/handlers/projects.rs

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
    models::project::{ProjectInput, ProjectPayload, ProjectView},
};

// GET /projects
#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "All projects with blocks, floors and objects", body = Vec<ProjectView>)
    )
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_service.list(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(projects)))
}

// GET /projects/{code}
#[utoipa::path(
    get,
    path = "/projects/{code}",
    tag = "Projects",
    params(("code" = String, Path, description = "Project code")),
    responses(
        (status = 200, description = "Project", body = ProjectView),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    AppPath(code): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.get(&app_state.db_pool, &code).await?;
    Ok((StatusCode::OK, Json(project)))
}

// POST /projects
#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Project created with its blocks and objects", body = ProjectView),
        (status = 400, description = "Invalid fields or duplicate code")
    )
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = ProjectInput::try_from(payload)?;

    let project = app_state
        .project_service
        .create(&app_state.db_pool, input)
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

// PUT /projects/{code}
#[utoipa::path(
    put,
    path = "/projects/{code}",
    tag = "Projects",
    request_body = ProjectPayload,
    params(("code" = String, Path, description = "Current project code")),
    responses(
        (status = 200, description = "Project updated, nested collections reconciled", body = ProjectView),
        (status = 400, description = "Invalid fields or duplicate code"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(app_state): State<AppState>,
    AppPath(code): AppPath<String>,
    AppJson(payload): AppJson<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state
        .project_service
        .update(&app_state.db_pool, &code, payload)
        .await?;

    Ok((StatusCode::OK, Json(project)))
}

// DELETE /projects/{code}
#[utoipa::path(
    delete,
    path = "/projects/{code}",
    tag = "Projects",
    params(("code" = String, Path, description = "Project code")),
    responses(
        (status = 204, description = "Project and everything it owns deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    State(app_state): State<AppState>,
    AppPath(code): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .project_service
        .delete(&app_state.db_pool, &code)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
