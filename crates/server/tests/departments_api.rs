//! # Department API Integration Tests
//!
//! Drives the full router against an in-memory database.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_department_trims_name() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/departments/", json!({ "name": "  Engineering  " }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Engineering");
    assert!(body["parent_id"].is_null());
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_department_without_trailing_slash() {
    let app = TestApp::new().await;
    let (status, _) = app.post("/departments", json!({ "name": "Ops" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_department_name_bounds() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/departments/", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name cannot be empty");

    let (status, body) = app
        .post("/departments/", json!({ "name": "x".repeat(201) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name too long (max 200)");

    let (status, _) = app
        .post("/departments/", json!({ "name": "x".repeat(200) }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_department_unknown_parent() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/departments/", json!({ "name": "Orphan", "parent_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "parent department not found");
}

#[tokio::test]
async fn test_create_department_malformed_body() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/departments/", json!({ "parent_id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required field: name");

    let (status, body) = app.post("/departments/", json!({ "name": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body"));
}

#[tokio::test]
async fn test_sibling_names_unique_per_parent() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;
    let ops = app.department("Ops", None).await;

    app.department("Platform", Some(eng)).await;
    let (status, body) = app
        .post(
            "/departments/",
            json!({ "name": " Platform ", "parent_id": eng }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "department name must be unique within the same parent"
    );

    // Same name under a different parent is fine
    app.department("Platform", Some(ops)).await;

    // Root scope is a scope of its own
    let (status, _) = app.post("/departments/", json!({ "name": "Eng" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    app.department("Platform", None).await;
}

#[tokio::test]
async fn test_create_employee() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;

    let (status, body) = app
        .post(
            &format!("/departments/{}/employees/", eng),
            json!({
                "full_name": "  Alice Smith ",
                "position": " Engineer ",
                "hired_at": "2024-03-01T09:00:00Z"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["full_name"], "Alice Smith");
    assert_eq!(body["position"], "Engineer");
    assert_eq!(body["department_id"], eng);
    assert_eq!(body["hired_at"], "2024-03-01T09:00:00Z");
}

#[tokio::test]
async fn test_create_employee_errors() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;

    let (status, body) = app
        .post(
            "/departments/404/employees/",
            json!({ "full_name": "Bob", "position": "QA" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "department not found");

    let (status, body) = app
        .post(
            "/departments/abc/employees/",
            json!({ "full_name": "Bob", "position": "QA" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid department id");

    let (status, body) = app
        .post(
            &format!("/departments/{}/employees/", eng),
            json!({ "full_name": "Bob", "position": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "position cannot be empty");

    let (status, _) = app
        .post(
            &format!("/departments/{}/employees/", eng),
            json!({ "full_name": "Bob", "position": "QA", "hired_at": "yesterday" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_department_defaults() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;
    let backend = app.department("Backend", Some(eng)).await;
    app.department("Storage", Some(backend)).await;
    app.employee(eng, "Zed").await;
    app.employee(eng, "Amy").await;

    let (status, body) = app.get(&format!("/departments/{}", eng)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Eng");
    // depth=1: direct children only
    assert_eq!(body["children"].as_array().unwrap().len(), 1);
    assert!(body["children"][0].get("children").is_none());
    // include_employees=true, sorted by full_name
    assert_eq!(body["employees"][0]["full_name"], "Amy");
    assert_eq!(body["employees"][1]["full_name"], "Zed");
}

#[tokio::test]
async fn test_get_department_depth_two_stops_before_great_grandchildren() {
    let app = TestApp::new().await;
    let root = app.department("Root", None).await;
    let child = app.department("Child", Some(root)).await;
    let grandchild = app.department("Grandchild", Some(child)).await;
    app.department("Great", Some(grandchild)).await;

    let (status, body) = app
        .get(&format!("/departments/{}?depth=2", root))
        .await;

    assert_eq!(status, StatusCode::OK);
    let child_node = &body["children"][0];
    assert_eq!(child_node["id"], child);
    let grandchild_node = &child_node["children"][0];
    assert_eq!(grandchild_node["id"], grandchild);
    assert!(grandchild_node.get("children").is_none());
}

#[tokio::test]
async fn test_get_department_query_validation() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;

    let (status, body) = app
        .get(&format!("/departments/{}?depth=6", eng))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "depth must be integer between 1 and 5");

    let (status, body) = app
        .get(&format!("/departments/{}?include_employees=maybe", eng))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "include_employees must be boolean");

    let (status, body) = app
        .get(&format!("/departments/{}?sort_employees=position", eng))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "sort_employees must be 'full_name' or 'created_at'"
    );

    let (status, body) = app.get("/departments/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "department not found");
}

#[tokio::test]
async fn test_get_department_without_employees() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;
    app.employee(eng, "Amy").await;

    let (status, body) = app
        .get(&format!(
            "/departments/{}?include_employees=false",
            eng
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("employees").is_none());
}

#[tokio::test]
async fn test_get_department_sort_by_created_at() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;
    app.employee(eng, "Zed").await;
    app.employee(eng, "Amy").await;

    let (_, body) = app
        .get(&format!(
            "/departments/{}?sort_employees=created_at",
            eng
        ))
        .await;
    assert_eq!(body["employees"][0]["full_name"], "Zed");
    assert_eq!(body["employees"][1]["full_name"], "Amy");
}

#[tokio::test]
async fn test_patch_rename() {
    let app = TestApp::new().await;
    let eng = app.department("Eng", None).await;
    let backend = app.department("Backend", Some(eng)).await;
    app.department("Frontend", Some(eng)).await;

    let (status, body) = app
        .patch(
            &format!("/departments/{}", backend),
            json!({ "name": " Server " }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Server");
    assert_eq!(body["parent_id"], eng);

    let (status, body) = app
        .patch(
            &format!("/departments/{}", backend),
            json!({ "name": "Frontend" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "department name must be unique within the same parent"
    );
}

#[tokio::test]
async fn test_patch_reparent_cycles() {
    let app = TestApp::new().await;
    let a = app.department("A", None).await;
    let b = app.department("B", Some(a)).await;
    let c = app.department("C", Some(b)).await;

    let (status, body) = app
        .patch(&format!("/departments/{}", a), json!({ "parent_id": c }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "cannot move department inside its own subtree"
    );

    let (status, body) = app
        .patch(&format!("/departments/{}", a), json!({ "parent_id": a }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "cannot be parent of itself");

    let (status, body) = app
        .patch(&format!("/departments/{}", c), json!({ "parent_id": null }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["parent_id"].is_null());

    let (status, body) = app
        .patch(&format!("/departments/{}", c), json!({ "parent_id": a }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parent_id"], a);
}

#[tokio::test]
async fn test_patch_absent_parent_keeps_parent() {
    let app = TestApp::new().await;
    let a = app.department("A", None).await;
    let b = app.department("B", Some(a)).await;

    let (status, body) = app
        .patch(&format!("/departments/{}", b), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parent_id"], a);
    assert_eq!(body["name"], "B");
}

#[tokio::test]
async fn test_patch_move_checks_new_scope() {
    let app = TestApp::new().await;
    let a = app.department("A", None).await;
    let b = app.department("B", None).await;
    app.department("Shared", Some(a)).await;
    let moving = app.department("Shared", Some(b)).await;

    let (status, _) = app
        .patch(
            &format!("/departments/{}", moving),
            json!({ "parent_id": a }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .patch(
            &format!("/departments/{}", moving),
            json!({ "parent_id": 4242 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "parent department not found");

    let (status, body) = app
        .patch("/departments/4242", json!({ "name": "Ghost" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "department not found");
}
