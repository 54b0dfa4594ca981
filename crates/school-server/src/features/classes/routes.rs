//! Class API routes
//!
//! - `POST /api/v1/classes` - Create a class
//! - `GET /api/v1/classes` - List classes, optionally filtered
//! - `GET /api/v1/classes/:id` - Get a class
//! - `PUT /api/v1/classes/:id` - Update a class
//! - `DELETE /api/v1/classes/:id` - Delete a class (references are left dangling)

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
        CreateClassCommand, CreateClassError, DeleteClassCommand, DeleteClassError,
        UpdateClassCommand, UpdateClassError,
    },
    queries::{GetClassError, GetClassQuery, ListClassesError, ListClassesQuery},
};

pub fn classes_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(create_class).get(list_classes))
        .route("/:id", get(get_class).put(update_class).delete(delete_class))
}

/// `POST /api/v1/classes`
///
/// - `201 Created` - Class created
/// - `400 Bad Request` - Validation error
/// - `409 Conflict` - Class code already in use
#[tracing::instrument(skip(pool, command))]
async fn create_class(
    State(pool): State<PgPool>,
    Json(command): Json<CreateClassCommand>,
) -> AppResult<Response> {
    let class = super::commands::create::handle(pool, command).await?;

    tracing::info!(class_id = class.id, "Class created via API");

    Ok(ApiResponse::success(class).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command))]
async fn update_class(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateClassCommand>,
) -> AppResult<Response> {
    command.id = id;
    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_class(State(pool): State<PgPool>, Path(id): Path<i64>) -> AppResult<Response> {
    let response = super::commands::delete::handle(pool, DeleteClassCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_class(State(pool): State<PgPool>, Path(id): Path<i64>) -> AppResult<Response> {
    let class = super::queries::get::handle(pool, GetClassQuery { id }).await?;
    Ok(ApiResponse::success(class).into_response())
}

#[tracing::instrument(skip(pool))]
async fn list_classes(
    State(pool): State<PgPool>,
    Query(query): Query<ListClassesQuery>,
) -> AppResult<Response> {
    let classes = super::queries::list::handle(pool, query).await?;
    Ok(ApiResponse::success(classes).into_response())
}

impl From<CreateClassError> for AppError {
    fn from(err: CreateClassError) -> Self {
        match err {
            CreateClassError::Validation(e) => AppError::Validation(e),
            CreateClassError::DuplicateClassCode(_) => AppError::Conflict(err.to_string()),
            CreateClassError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<UpdateClassError> for AppError {
    fn from(err: UpdateClassError) -> Self {
        match err {
            UpdateClassError::Validation(e) => AppError::Validation(e),
            UpdateClassError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateClassError::DuplicateClassCode(_) => AppError::Conflict(err.to_string()),
            UpdateClassError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteClassError> for AppError {
    fn from(err: DeleteClassError) -> Self {
        match err {
            DeleteClassError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteClassError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetClassError> for AppError {
    fn from(err: GetClassError) -> Self {
        match err {
            GetClassError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetClassError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListClassesError> for AppError {
    fn from(err: ListClassesError) -> Self {
        match err {
            ListClassesError::Database(e) => AppError::Database(e),
        }
    }
}
