use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Student;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteStudentCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteStudentResponse {
    pub message: String,
    pub student: Student,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteStudentError {
    #[error("Student with id {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteStudentResponse, DeleteStudentError>> for DeleteStudentCommand {}

impl crate::cqrs::middleware::Command for DeleteStudentCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteStudentCommand,
) -> Result<DeleteStudentResponse, DeleteStudentError> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "DELETE FROM students WHERE id = $1 RETURNING {}",
        Student::COLUMNS
    ))
    .bind(command.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(DeleteStudentError::NotFound(command.id))?;

    tracing::info!("Student deleted");

    Ok(DeleteStudentResponse {
        message: "Student deleted successfully".to_string(),
        student,
    })
}
