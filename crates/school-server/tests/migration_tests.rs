//! Schema constraints enforced by the database itself

use sqlx::PgPool;

const INSERT_TEACHER: &str = "INSERT INTO teachers (name, birth_date, phone, email, class_id) \
                              VALUES ('Carla', '1980-05-10', '1', $1, $2)";

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_unique_constraints_exist(pool: PgPool) {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT conname::TEXT FROM pg_constraint WHERE contype = 'u' ORDER BY conname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(names.contains(&"classes_class_code_key".to_string()));
    assert!(names.contains(&"students_enrollment_number_key".to_string()));
    assert!(names.contains(&"teachers_email_key".to_string()));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_teacher_class_index_is_partial(pool: PgPool) {
    for email in ["a@school.com", "b@school.com"] {
        sqlx::query(INSERT_TEACHER)
            .bind(email)
            .bind(None::<i64>)
            .execute(&pool)
            .await
            .unwrap();
    }

    sqlx::query(INSERT_TEACHER)
        .bind("c@school.com")
        .bind(5_i64)
        .execute(&pool)
        .await
        .unwrap();
    let err = sqlx::query(INSERT_TEACHER)
        .bind("d@school.com")
        .bind(5_i64)
        .execute(&pool)
        .await
        .unwrap_err();

    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("teachers_class_id_key")
    );
}
