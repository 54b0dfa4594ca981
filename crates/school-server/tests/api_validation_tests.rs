//! Router tests for requests rejected before the store is touched
//!
//! These run against a pool that cannot connect, so any request that reached
//! the database would fail with a 500 instead of the asserted status.

use axum::http::StatusCode;
use serde_json::json;

mod helpers;
use helpers::{
    send, send_raw, setup_test_app, student_payload, teacher_payload, unreachable_pool,
};

#[tokio::test]
async fn test_create_student_missing_field_names_it() {
    let app = setup_test_app(unreachable_pool());

    let mut payload = student_payload("E001", None);
    payload.as_object_mut().unwrap().remove("enrollmentNumber");

    let (status, json) = send(&app, "POST", "/api/v1/students", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "enrollmentNumber is required");
    assert_eq!(json["error"]["details"]["field"], "enrollmentNumber");
}

#[tokio::test]
async fn test_create_student_invalid_date() {
    let app = setup_test_app(unreachable_pool());

    let mut payload = student_payload("E001", None);
    payload["birthDate"] = json!("2005-02-30");

    let (status, json) = send(&app, "POST", "/api/v1/students", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"]["field"], "birthDate");
}

#[tokio::test]
async fn test_create_teacher_invalid_email() {
    let app = setup_test_app(unreachable_pool());

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/teachers",
        Some(teacher_payload("not-an-email", None)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "email must be a valid email address");
}

#[tokio::test]
async fn test_create_class_blank_code() {
    let app = setup_test_app(unreachable_pool());

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/classes",
        Some(json!({ "classCode": "  ", "shift": "evening", "subject": "math" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"]["field"], "classCode");
}

#[tokio::test]
async fn test_wrong_field_type_names_field() {
    let app = setup_test_app(unreachable_pool());

    let mut payload = student_payload("E001", None);
    payload["phone"] = json!(11999999999_i64);

    let (status, json) = send(&app, "POST", "/api/v1/students", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["details"]["field"], "phone");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("invalid type"));
}

#[tokio::test]
async fn test_string_class_id_names_field() {
    let app = setup_test_app(unreachable_pool());

    let mut payload = teacher_payload("carla@school.com", None);
    payload["classId"] = json!("3");

    let (status, json) = send(&app, "POST", "/api/v1/teachers", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["details"]["field"], "classId");
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = setup_test_app(unreachable_pool());

    for (method, uri) in [("POST", "/api/v1/classes"), ("PUT", "/api/v1/students/1")] {
        let (status, json) = send_raw(&app, method, uri, r#"{"classCode": "T1""#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["success"], false, "{}", uri);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR", "{}", uri);
        assert!(json["error"].get("details").is_none(), "{}", uri);
    }
}

#[tokio::test]
async fn test_non_object_body_is_validation_error() {
    let app = setup_test_app(unreachable_pool());

    let (status, json) = send_raw(&app, "POST", "/api/v1/students", "[1, 2]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_without_fields_is_rejected() {
    let app = setup_test_app(unreachable_pool());

    for uri in ["/api/v1/students/1", "/api/v1/teachers/1", "/api/v1/classes/1"] {
        let (status, json) = send(&app, "PUT", uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR", "{}", uri);
        assert!(json["error"].get("details").is_none(), "{}", uri);
    }
}

#[tokio::test]
async fn test_list_with_invalid_birth_date_filter() {
    let app = setup_test_app(unreachable_pool());

    let (status, json) = send(&app, "GET", "/api/v1/students?birthDate=yesterday", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"]["field"], "birthDate");
}

#[tokio::test]
async fn test_list_with_invalid_class_id_filter() {
    let app = setup_test_app(unreachable_pool());

    let (status, json) = send(&app, "GET", "/api/v1/teachers?classId=three", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "classId must be an integer");
}

#[tokio::test]
async fn test_non_numeric_path_id_is_bad_request() {
    let app = setup_test_app(unreachable_pool());

    let (status, _) = send(&app, "GET", "/api/v1/students/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = setup_test_app(unreachable_pool());

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_test_app(unreachable_pool());

    let (status, _) = send(&app, "GET", "/api/v1/courses", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
