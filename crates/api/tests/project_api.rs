//! HTTP-level integration tests for the project and fabricator endpoints.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, delete, get, get_anon, post_empty, post_json, post_json_anon, put_json};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_project_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "start_date": "2025-06-01",
        "deadline": "2025-06-20",
        "hours_allocated": 20
    })
}

/// Create a project via the API and return its JSON representation.
async fn create_project(pool: PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/projects", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Project reads and writes require a Bearer token.
#[sqlx::test(migrations = "../db/migrations")]
async fn project_endpoints_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get_anon(app, "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = post_json_anon(app, "/api/v1/projects", sample_project_body("No badge")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Fabricator roster changes require a Bearer token.
#[sqlx::test(migrations = "../db/migrations")]
async fn fabricator_endpoints_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Sarah Chen" });
    let response = post_json_anon(app, "/api/v1/fabricators", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// New projects get the full set of lifecycle defaults.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_applies_defaults(pool: PgPool) {
    let json = create_project(pool, sample_project_body("Handrail")).await;

    assert_eq!(json["name"], "Handrail");
    assert_eq!(json["status"], "Not Started");
    assert_eq!(json["priority"], "Medium");
    assert_eq!(json["assigned_to"], "Unassigned");
    assert_eq!(json["project_type"], "Custom");
    assert_eq!(json["hours_used"], 0);
    assert_eq!(json["progress_percent"], 0);
    assert!(json["completed_at"].is_null());
}

/// A blank name is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_rejects_blank_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/projects", sample_project_body("")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A deadline before the start date is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_rejects_inverted_dates(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = sample_project_body("Backwards");
    body["deadline"] = serde_json::json!("2025-05-01");
    let response = post_json(app, "/api/v1/projects", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Zero allocated hours is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_rejects_zero_hours(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = sample_project_body("Freebie");
    body["hours_allocated"] = serde_json::json!(0);
    let response = post_json(app, "/api/v1/projects", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read / update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

/// Partial update touches only the provided fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_project_is_partial(pool: PgPool) {
    let created = create_project(pool.clone(), sample_project_body("Gate frame")).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "hours_used": 7, "status": "In Progress" });
    let response = put_json(app, &format!("/api/v1/projects/{id}"), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["hours_used"], 7);
    assert_eq!(json["status"], "In Progress");
    assert_eq!(json["name"], "Gate frame");
}

/// Reopening a completed project is an illegal transition and returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_rejects_transition_out_of_completed(pool: PgPool) {
    let created = create_project(pool.clone(), sample_project_body("Done deal")).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/projects/{id}/complete")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "status": "In Progress" });
    let response = put_json(app, &format!("/api/v1/projects/{id}"), body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Complete
// ---------------------------------------------------------------------------

/// Completing forces progress to 100, books the full allocation, and stamps
/// the completion time.
#[sqlx::test(migrations = "../db/migrations")]
async fn complete_forces_terminal_fields(pool: PgPool) {
    let created = create_project(pool.clone(), sample_project_body("Mezzanine")).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_empty(app, &format!("/api/v1/projects/{id}/complete")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "Completed");
    assert_eq!(json["progress_percent"], 100);
    assert_eq!(json["hours_used"], json["hours_allocated"]);
    assert!(json["completed_at"].is_string());
}

/// Completing twice returns 409 the second time.
#[sqlx::test(migrations = "../db/migrations")]
async fn complete_twice_conflicts(pool: PgPool) {
    let created = create_project(pool.clone(), sample_project_body("Mezzanine")).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/projects/{id}/complete")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_empty(app, &format!("/api/v1/projects/{id}/complete")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Completing a nonexistent project returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn complete_unknown_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/projects/9999/complete").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// Uploading a file appends an attachment reference to the project.
#[sqlx::test(migrations = "../db/migrations")]
async fn upload_attachment_appends_reference(pool: PgPool) {
    let created = create_project(pool.clone(), sample_project_body("Canopy")).await;
    let id = created["id"].as_i64().unwrap();

    let boundary = "fabshop-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"drawing.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.4 fake drawing bytes\r\n\
         --{boundary}--\r\n"
    );

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/projects/{id}/attachments"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(AUTHORIZATION, format!("Bearer {}", common::auth_token()))
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let attachments = json["attachments"].as_array().unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0]["name"], "drawing.pdf");
    assert_eq!(attachments[0]["content_type"], "application/pdf");
    assert!(attachments[0]["url"]
        .as_str()
        .unwrap()
        .starts_with(&format!("/files/project-{id}/")));
}

/// The attachment list endpoint returns the stored references.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_attachments_starts_empty(pool: PgPool) {
    let created = create_project(pool.clone(), sample_project_body("Stair stringers")).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/projects/{id}/attachments")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Fabricators
// ---------------------------------------------------------------------------

/// Creating a fabricator twice with the same name conflicts.
#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_fabricator_name_conflicts(pool: PgPool) {
    let body = serde_json::json!({ "name": "Sarah Chen" });

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/fabricators", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/fabricators", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Deleting a fabricator leaves assigned projects untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_fabricator_does_not_cascade(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/fabricators",
        serde_json::json!({ "name": "Mike Johnson" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let fabricator = body_json(response).await;
    let fabricator_id = fabricator["id"].as_i64().unwrap();

    let mut body = sample_project_body("Frame welds");
    body["assigned_to"] = serde_json::json!("Mike Johnson");
    let project = create_project(pool.clone(), body).await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/fabricators/{fabricator_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["assigned_to"], "Mike Johnson");
}
