//! HTTP tests for /projects. Each test gets a fresh database from
//! `#[sqlx::test]`; run with `cargo test -- --ignored` and `DATABASE_URL` set.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

fn x1_payload() -> Value {
    json!({
        "code": "x1",
        "name": "Test",
        "blocks": [{ "name": "B1", "floors": ["1", "2"] }],
        "objects": ["Lobby"]
    })
}

async fn create_catalog(pool: &PgPool) -> (i64, i64) {
    let app = build_test_app(pool.clone());
    let wt = body_json(
        post_json(
            app.clone(),
            "/work_types",
            &json!({ "name": "Plastering", "order": 1, "color": "#e53e3e", "category": "Rough works" }),
        )
        .await,
    )
    .await;
    let ex = body_json(post_json(app, "/executors", &json!({ "name": "Crew #1" })).await).await;
    (wt["id"].as_i64().unwrap(), ex["id"].as_i64().unwrap())
}

fn floor_id(project: &Value, block: &str, number: &str) -> i64 {
    project["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["name"] == block)
        .and_then(|b| b["floors"].as_array().unwrap().iter().find(|f| f["number"] == number))
        .and_then(|f| f["id"].as_i64())
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn create_project_with_blocks_and_objects(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/projects", &x1_payload()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "x1");
    assert_eq!(json["name"], "Test");
    assert_eq!(json["blocks"].as_array().unwrap().len(), 1);
    assert_eq!(json["blocks"][0]["name"], "B1");
    let floors: Vec<&str> = json["blocks"][0]["floors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["number"].as_str().unwrap())
        .collect();
    assert_eq!(floors, ["1", "2"]);
    assert_eq!(json["objects"].as_array().unwrap().len(), 1);
    assert_eq!(json["objects"][0]["name"], "Lobby");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_code_is_rejected_without_side_effects(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let first = post_json(app.clone(), "/projects", &x1_payload()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/projects", &x1_payload()).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(second).await,
        json!({ "error": "Project with this code already exists" })
    );

    let blocks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blocks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(blocks, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn invalid_payload_reports_field_errors(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/projects",
        &json!({ "code": "", "name": "Test", "blocks": [{ "name": "", "floors": [1] }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["code"].is_array());
    assert!(json["blocks[0].name"].is_array());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn malformed_json_is_a_bad_request(pool: PgPool) {
    let app = build_test_app(pool);
    let response = common::send(
        app,
        axum::http::Method::POST,
        "/projects",
        Some(&json!("not an object")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn get_and_list_projects(pool: PgPool) {
    let app = build_test_app(pool);
    post_json(app.clone(), "/projects", &x1_payload()).await;

    let response = get(app.clone(), "/projects/x1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["blocks"][0]["name"], "B1");

    let list = body_json(get(app.clone(), "/projects").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let missing = get(app, "/projects/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(missing).await, json!({ "error": "Project not found" }));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn update_reconciles_blocks_floors_and_objects(pool: PgPool) {
    let (work_type_id, executor_id) = create_catalog(&pool).await;
    let app = build_test_app(pool.clone());

    let created = body_json(post_json(app.clone(), "/projects", &x1_payload()).await).await;
    let floor_1 = floor_id(&created, "B1", "1");
    let floor_2 = floor_id(&created, "B1", "2");
    let lobby = created["objects"][0]["id"].as_i64().unwrap();

    // One work on floor 2, which is about to disappear.
    let work = post_json(
        app.clone(),
        "/works",
        &json!({
            "executor_id": executor_id, "work_type_id": work_type_id,
            "start_date": "2024-06-01", "end_date": "2024-06-10",
            "status": "in-progress", "priority": "medium", "progress": 40,
            "floor_id": floor_2, "object_id": lobby
        }),
    )
    .await;
    assert_eq!(work.status(), StatusCode::CREATED);

    let response = put_json(
        app.clone(),
        "/projects/x1",
        &json!({
            "code": "x1",
            "name": "Renamed",
            "blocks": [
                { "name": "B1", "floors": ["1", "3"] },
                { "name": "B2", "floors": ["1"] }
            ],
            "objects": ["Lobby", "Roof"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["name"], "Renamed");
    let block_names: Vec<&str> = updated["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(block_names, ["B1", "B2"]);
    // Retained floors and objects keep their ids.
    assert_eq!(floor_id(&updated, "B1", "1"), floor_1);
    assert_eq!(updated["objects"][0]["id"].as_i64().unwrap(), lobby);
    assert_eq!(updated["objects"][1]["name"], "Roof");

    let works = body_json(get(app, "/works").await).await;
    assert!(works.as_array().unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn update_to_a_taken_code_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    post_json(app.clone(), "/projects", &x1_payload()).await;
    post_json(app.clone(), "/projects", &json!({ "code": "x2", "name": "Other" })).await;

    let response = put_json(app.clone(), "/projects/x2", &json!({ "code": "x1", "name": "Other" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Project with this code already exists" })
    );

    let missing = put_json(app, "/projects/nope", &x1_payload()).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn delete_cascades_to_children_and_works(pool: PgPool) {
    let (work_type_id, executor_id) = create_catalog(&pool).await;
    let app = build_test_app(pool.clone());

    let created = body_json(post_json(app.clone(), "/projects", &x1_payload()).await).await;
    post_json(
        app.clone(),
        "/works",
        &json!({
            "executor_id": executor_id, "work_type_id": work_type_id,
            "start_date": "2024-06-01", "end_date": "2024-06-10",
            "status": "not-started", "priority": 3, "progress": 0,
            "floor_id": floor_id(&created, "B1", "1"),
            "object_id": created["objects"][0]["id"]
        }),
    )
    .await;

    let response = delete(app.clone(), "/projects/x1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for table in ["projects", "blocks", "floors", "objects", "works"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "{table} should be empty");
    }
    // The catalog is not owned by the project.
    let work_types: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM work_types")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(work_types, 1);

    let again = delete(app, "/projects/x1").await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn update_of_missing_project_is_not_found_even_with_invalid_body(pool: PgPool) {
    let app = build_test_app(pool);
    let response = put_json(app, "/projects/nope", &json!({ "code": "", "name": "" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Project not found" }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn whitespace_only_code_is_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/projects", &json!({ "code": "   ", "name": "  " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], json!(["This field is required."]));
    assert_eq!(json["name"], json!(["This field is required."]));

    let projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(projects, 0);
}
