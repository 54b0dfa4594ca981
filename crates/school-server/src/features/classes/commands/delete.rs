//! Delete class command
//!
//! Deleting a class does not cascade. Students and teachers that referenced
//! it keep the now dangling `class_id`.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Class;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClassCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClassResponse {
    pub message: String,
    pub class: Class,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteClassError {
    #[error("Class with id {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteClassResponse, DeleteClassError>> for DeleteClassCommand {}

impl crate::cqrs::middleware::Command for DeleteClassCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteClassCommand,
) -> Result<DeleteClassResponse, DeleteClassError> {
    let class = sqlx::query_as::<_, Class>(&format!(
        "DELETE FROM classes WHERE id = $1 RETURNING {}",
        Class::COLUMNS
    ))
    .bind(command.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(DeleteClassError::NotFound(command.id))?;

    tracing::info!(class_code = %class.class_code, "Class deleted");

    Ok(DeleteClassResponse {
        message: "Class deleted successfully".to_string(),
        class,
    })
}
