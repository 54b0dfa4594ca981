//! Student API routes
//!
//! - `POST /api/v1/students` - Create a student
//! - `GET /api/v1/students` - List students, optionally filtered
//! - `GET /api/v1/students/class/:class_id` - List the students of one class
//! - `GET /api/v1/students/:id` - Get a student
//! - `PUT /api/v1/students/:id` - Update a student
//! - `DELETE /api/v1/students/:id` - Delete a student

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::api::{extract::Json, response::ApiResponse};
use crate::error::{AppError, AppResult};

use super::{
    commands::{
        CreateStudentCommand, CreateStudentError, DeleteStudentCommand, DeleteStudentError,
        UpdateStudentCommand, UpdateStudentError,
    },
    queries::{
        GetStudentError, GetStudentQuery, ListStudentsByClassError, ListStudentsByClassQuery,
        ListStudentsError, ListStudentsQuery,
    },
};

pub fn students_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(create_student).get(list_students))
        .route("/class/:class_id", get(list_students_by_class))
        .route("/:id", get(get_student).put(update_student).delete(delete_student))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/v1/students`
///
/// - `201 Created` - Student created
/// - `400 Bad Request` - Validation error
/// - `404 Not Found` - `classId` references a missing class
/// - `409 Conflict` - Enrollment number already in use
#[tracing::instrument(skip(pool, command))]
async fn create_student(
    State(pool): State<PgPool>,
    Json(command): Json<CreateStudentCommand>,
) -> AppResult<Response> {
    let student = super::commands::create::handle(pool, command).await?;

    tracing::info!(student_id = student.id, "Student created via API");

    Ok(ApiResponse::success(student).with_status(StatusCode::CREATED))
}

/// `PUT /api/v1/students/:id`
#[tracing::instrument(skip(pool, command))]
async fn update_student(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateStudentCommand>,
) -> AppResult<Response> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;

    Ok(ApiResponse::success(response).into_response())
}

/// `DELETE /api/v1/students/:id`
#[tracing::instrument(skip(pool))]
async fn delete_student(State(pool): State<PgPool>, Path(id): Path<i64>) -> AppResult<Response> {
    let response = super::commands::delete::handle(pool, DeleteStudentCommand { id }).await?;

    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/students/:id`
#[tracing::instrument(skip(pool))]
async fn get_student(State(pool): State<PgPool>, Path(id): Path<i64>) -> AppResult<Response> {
    let student = super::queries::get::handle(pool, GetStudentQuery { id }).await?;

    Ok(ApiResponse::success(student).into_response())
}

/// `GET /api/v1/students?name=&birthDate=&phone=&email=&enrollmentNumber=&classId=`
#[tracing::instrument(skip(pool))]
async fn list_students(
    State(pool): State<PgPool>,
    Query(query): Query<ListStudentsQuery>,
) -> AppResult<Response> {
    let students = super::queries::list::handle(pool, query).await?;

    Ok(ApiResponse::success(students).into_response())
}

/// `GET /api/v1/students/class/:class_id`
#[tracing::instrument(skip(pool))]
async fn list_students_by_class(
    State(pool): State<PgPool>,
    Path(class_id): Path<i64>,
) -> AppResult<Response> {
    let students =
        super::queries::list_by_class::handle(pool, ListStudentsByClassQuery { class_id }).await?;

    Ok(ApiResponse::success(students).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

impl From<CreateStudentError> for AppError {
    fn from(err: CreateStudentError) -> Self {
        match err {
            CreateStudentError::Validation(e) => AppError::Validation(e),
            CreateStudentError::ClassNotFound(_) => AppError::NotFound(err.to_string()),
            CreateStudentError::DuplicateEnrollmentNumber(_) => {
                AppError::Conflict(err.to_string())
            },
            CreateStudentError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateStudentError> for AppError {
    fn from(err: UpdateStudentError) -> Self {
        match err {
            UpdateStudentError::Validation(e) => AppError::Validation(e),
            UpdateStudentError::NotFound(_) | UpdateStudentError::ClassNotFound(_) => {
                AppError::NotFound(err.to_string())
            },
            UpdateStudentError::DuplicateEnrollmentNumber(_) => {
                AppError::Conflict(err.to_string())
            },
            UpdateStudentError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteStudentError> for AppError {
    fn from(err: DeleteStudentError) -> Self {
        match err {
            DeleteStudentError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteStudentError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetStudentError> for AppError {
    fn from(err: GetStudentError) -> Self {
        match err {
            GetStudentError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetStudentError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListStudentsError> for AppError {
    fn from(err: ListStudentsError) -> Self {
        match err {
            ListStudentsError::Validation(e) => AppError::Validation(e),
            ListStudentsError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListStudentsByClassError> for AppError {
    fn from(err: ListStudentsByClassError) -> Self {
        match err {
            ListStudentsByClassError::ClassNotFound(_) => AppError::NotFound(err.to_string()),
            ListStudentsByClassError::Database(e) => AppError::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            AppError::from(CreateStudentError::ClassNotFound(9)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(CreateStudentError::DuplicateEnrollmentNumber("E001".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(UpdateStudentError::NotFound(1)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ListStudentsByClassError::ClassNotFound(2)).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_not_found_message_names_id() {
        let err = AppError::from(GetStudentError::NotFound(42));
        assert_eq!(err.to_string(), "Student with id 42 not found");
    }
}
