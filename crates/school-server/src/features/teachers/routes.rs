//! Teacher API routes
//!
//! - `POST /api/v1/teachers` - Create a teacher
//! - `GET /api/v1/teachers` - List teachers, optionally filtered
//! - `GET /api/v1/teachers/:id` - Get a teacher
//! - `PUT /api/v1/teachers/:id` - Update a teacher
//! - `DELETE /api/v1/teachers/:id` - Delete a teacher

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
        CreateTeacherCommand, CreateTeacherError, DeleteTeacherCommand, DeleteTeacherError,
        UpdateTeacherCommand, UpdateTeacherError,
    },
    queries::{GetTeacherError, GetTeacherQuery, ListTeachersError, ListTeachersQuery},
};

pub fn teachers_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(create_teacher).get(list_teachers))
        .route("/:id", get(get_teacher).put(update_teacher).delete(delete_teacher))
}

/// `POST /api/v1/teachers`
///
/// - `201 Created` - Teacher created
/// - `400 Bad Request` - Validation error
/// - `404 Not Found` - `classId` references a missing class
/// - `409 Conflict` - Email in use, or the class already has a teacher
#[tracing::instrument(skip(pool, command))]
async fn create_teacher(
    State(pool): State<PgPool>,
    Json(command): Json<CreateTeacherCommand>,
) -> AppResult<Response> {
    let teacher = super::commands::create::handle(pool, command).await?;

    tracing::info!(teacher_id = teacher.id, "Teacher created via API");

    Ok(ApiResponse::success(teacher).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command))]
async fn update_teacher(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateTeacherCommand>,
) -> AppResult<Response> {
    command.id = id;
    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_teacher(State(pool): State<PgPool>, Path(id): Path<i64>) -> AppResult<Response> {
    let response = super::commands::delete::handle(pool, DeleteTeacherCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_teacher(State(pool): State<PgPool>, Path(id): Path<i64>) -> AppResult<Response> {
    let teacher = super::queries::get::handle(pool, GetTeacherQuery { id }).await?;
    Ok(ApiResponse::success(teacher).into_response())
}

#[tracing::instrument(skip(pool))]
async fn list_teachers(
    State(pool): State<PgPool>,
    Query(query): Query<ListTeachersQuery>,
) -> AppResult<Response> {
    let teachers = super::queries::list::handle(pool, query).await?;
    Ok(ApiResponse::success(teachers).into_response())
}

impl From<CreateTeacherError> for AppError {
    fn from(err: CreateTeacherError) -> Self {
        match err {
            CreateTeacherError::Validation(e) => AppError::Validation(e),
            CreateTeacherError::ClassNotFound(_) => AppError::NotFound(err.to_string()),
            CreateTeacherError::DuplicateEmail(_) | CreateTeacherError::ClassAlreadyAssigned(_) => {
                AppError::Conflict(err.to_string())
            },
            CreateTeacherError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateTeacherError> for AppError {
    fn from(err: UpdateTeacherError) -> Self {
        match err {
            UpdateTeacherError::Validation(e) => AppError::Validation(e),
            UpdateTeacherError::NotFound(_) | UpdateTeacherError::ClassNotFound(_) => {
                AppError::NotFound(err.to_string())
            },
            UpdateTeacherError::DuplicateEmail(_) | UpdateTeacherError::ClassAlreadyAssigned(_) => {
                AppError::Conflict(err.to_string())
            },
            UpdateTeacherError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteTeacherError> for AppError {
    fn from(err: DeleteTeacherError) -> Self {
        match err {
            DeleteTeacherError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteTeacherError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetTeacherError> for AppError {
    fn from(err: GetTeacherError) -> Self {
        match err {
            GetTeacherError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetTeacherError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListTeachersError> for AppError {
    fn from(err: ListTeachersError) -> Self {
        match err {
            ListTeachersError::Validation(e) => AppError::Validation(e),
            ListTeachersError::Database(e) => AppError::Database(e),
        }
    }
}
