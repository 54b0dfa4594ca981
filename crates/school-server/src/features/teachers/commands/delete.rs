use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Teacher;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTeacherCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTeacherResponse {
    pub message: String,
    pub teacher: Teacher,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteTeacherError {
    #[error("Teacher with id {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteTeacherResponse, DeleteTeacherError>> for DeleteTeacherCommand {}

impl crate::cqrs::middleware::Command for DeleteTeacherCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteTeacherCommand,
) -> Result<DeleteTeacherResponse, DeleteTeacherError> {
    let teacher = sqlx::query_as::<_, Teacher>(&format!(
        "DELETE FROM teachers WHERE id = $1 RETURNING {}",
        Teacher::COLUMNS
    ))
    .bind(command.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(DeleteTeacherError::NotFound(command.id))?;

    tracing::info!("Teacher deleted");

    Ok(DeleteTeacherResponse {
        message: "Teacher deleted successfully".to_string(),
        teacher,
    })
}
