// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Obra Progress API",
        description = "Construction progress tracking: projects, their blocks, floors and objects, and the works carried out on them."
    ),
    paths(
        // --- System ---
        handlers::system::ping,
        handlers::system::seed_data,

        // --- Projects ---
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::create_project,
        handlers::projects::update_project,
        handlers::projects::delete_project,

        // --- Works ---
        handlers::works::list_works,
        handlers::works::get_work,
        handlers::works::create_work,
        handlers::works::update_work,
        handlers::works::delete_work,

        // --- Catalog ---
        handlers::catalog::list_work_types,
        handlers::catalog::create_work_type,
        handlers::catalog::list_executors,
        handlers::catalog::create_executor,
    ),
    components(
        schemas(
            // --- Projects ---
            models::project::Project,
            models::project::ProjectView,
            models::project::BlockView,
            models::project::FloorView,
            models::project::ObjectView,
            models::project::ProjectPayload,
            models::project::BlockPayload,

            // --- Works ---
            models::work::Work,
            models::work::WorkView,
            models::work::WorkPayload,
            models::work::WorkStatus,

            // --- Catalog ---
            models::catalog::WorkType,
            models::catalog::WorkTypePayload,
            models::catalog::Executor,
            models::catalog::ExecutorPayload,

            // --- Seed ---
            handlers::system::SeedResponse,
            services::seed_service::SeedSummary,
        )
    ),
    tags(
        (name = "System", description = "Liveness and demo data"),
        (name = "Projects", description = "Projects with their blocks, floors and objects"),
        (name = "Works", description = "Works scheduled on floors and objects"),
        (name = "Catalog", description = "Work types and executors")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/ping",
            "/seed_data",
            "/projects",
            "/projects/{code}",
            "/works",
            "/works/{id}",
            "/work_types",
            "/executors",
        ] {
            assert!(paths.contains(&expected), "{expected} missing from OpenAPI");
        }
    }
}
