//! Student endpoints against a real database
//!
//! Run with `DATABASE_URL` pointing at a PostgreSQL server and `--ignored`.

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

mod helpers;
use helpers::{
    count, create_class, create_student, delete, get, post, put, setup_test_app, student_payload,
};

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_create_then_get_round_trips_fields(pool: PgPool) {
    let app = setup_test_app(pool);
    let class_id = create_class(&app, "T1").await;

    let payload = student_payload("E001", Some(class_id));
    let (status, created) = post(&app, "/api/v1/students", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["data"]["id"].as_i64().unwrap();
    let (status, fetched) = get(&app, &format!("/api/v1/students/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    for key in ["name", "birthDate", "phone", "email", "enrollmentNumber", "classId"] {
        assert_eq!(fetched["data"][key], payload[key], "{}", key);
    }
    assert_eq!(fetched["data"], created["data"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_values_are_stored_trimmed(pool: PgPool) {
    let app = setup_test_app(pool);

    let mut payload = student_payload("  E001  ", None);
    payload["name"] = json!("  Ana Silva ");
    let (status, created) = post(&app, "/api/v1/students", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["enrollmentNumber"], "E001");
    assert_eq!(created["data"]["name"], "Ana Silva");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_duplicate_enrollment_number_conflicts(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    create_student(&app, "E001", None).await;

    let (status, json) = post(&app, "/api/v1/students", student_payload("E001", None)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(count(&pool, "students").await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_missing_class_is_not_found_and_writes_nothing(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, json) = post(&app, "/api/v1/students", student_payload("E001", Some(999))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["message"], "Class with id 999 not found");
    assert_eq!(count(&pool, "students").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_validation_failure_writes_nothing(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut payload = student_payload("E001", None);
    payload["phone"] = json!("");
    let (status, _) = post(&app, "/api/v1/students", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool, "students").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_list_filters_combine_with_and(pool: PgPool) {
    let app = setup_test_app(pool);
    let t1 = create_class(&app, "T1").await;
    let t2 = create_class(&app, "T2").await;

    let mut ana_t1 = student_payload("E001", Some(t1));
    ana_t1["name"] = json!("Ana Silva");
    let mut ana_t2 = student_payload("E002", Some(t2));
    ana_t2["name"] = json!("Mariana Costa");
    let mut bruno_t1 = student_payload("E003", Some(t1));
    bruno_t1["name"] = json!("Bruno Lima");
    for payload in [ana_t1, ana_t2, bruno_t1] {
        let (status, _) = post(&app, "/api/v1/students", payload).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = get(&app, "/api/v1/students").await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    let (_, ana) = get(&app, "/api/v1/students?name=ana").await;
    let names: Vec<_> = ana["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Mariana Costa")], "substring match is case-sensitive");

    let (_, both) = get(&app, &format!("/api/v1/students?name=Ana&classId={}", t1)).await;
    let rows = both["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["enrollmentNumber"], "E001");

    let (_, reordered) = get(&app, &format!("/api/v1/students?classId={}&name=Ana", t1)).await;
    assert_eq!(reordered["data"], both["data"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_list_is_ordered_and_repeatable(pool: PgPool) {
    let app = setup_test_app(pool);
    for n in ["E003", "E001", "E002"] {
        create_student(&app, n, None).await;
    }

    let (_, first) = get(&app, "/api/v1/students").await;
    let (_, second) = get(&app, "/api/v1/students").await;
    assert_eq!(first, second);

    let ids: Vec<i64> = first["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_list_by_class(pool: PgPool) {
    let app = setup_test_app(pool);
    let t1 = create_class(&app, "T1").await;
    create_student(&app, "E001", Some(t1)).await;
    create_student(&app, "E002", None).await;

    let (status, json) = get(&app, &format!("/api/v1/students/class/{}", t1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (status, _) = get(&app, "/api/v1/students/class/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_update_changes_only_supplied_fields(pool: PgPool) {
    let app = setup_test_app(pool);
    let id = create_student(&app, "E001", None).await;
    let uri = format!("/api/v1/students/{}", id);
    let (_, before) = get(&app, &uri).await;

    let (status, json) = put(&app, &uri, json!({ "phone": "11988887777" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["message"], "Student updated successfully");
    let student = &json["data"]["student"];
    assert_eq!(student["phone"], "11988887777");
    assert_eq!(student["name"], before["data"]["name"]);
    assert_eq!(student["enrollmentNumber"], "E001");
    assert_ne!(student["updatedAt"], before["data"]["updatedAt"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_update_to_missing_class_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool);
    let id = create_student(&app, "E001", None).await;
    let uri = format!("/api/v1/students/{}", id);

    let (status, _) = put(&app, &uri, json!({ "classId": 999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = get(&app, &uri).await;
    assert_eq!(json["data"]["classId"], json!(null));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_update_to_taken_enrollment_number_conflicts(pool: PgPool) {
    let app = setup_test_app(pool);
    create_student(&app, "E001", None).await;
    let id = create_student(&app, "E002", None).await;
    let uri = format!("/api/v1/students/{}", id);

    let (status, _) = put(&app, &uri, json!({ "enrollmentNumber": "E001" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-submitting its own number is not a conflict
    let (status, _) = put(&app, &uri, json!({ "enrollmentNumber": "E002" })).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_update_null_class_unassigns(pool: PgPool) {
    let app = setup_test_app(pool);
    let t1 = create_class(&app, "T1").await;
    let id = create_student(&app, "E001", Some(t1)).await;

    let (status, json) = put(
        &app,
        &format!("/api/v1/students/{}", id),
        json!({ "classId": null }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["student"]["classId"], json!(null));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_delete_returns_record_then_not_found(pool: PgPool) {
    let app = setup_test_app(pool);
    let id = create_student(&app, "E001", None).await;
    let uri = format!("/api/v1/students/{}", id);

    let (status, json) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["message"], "Student deleted successfully");
    assert_eq!(json["data"]["student"]["id"], id);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
