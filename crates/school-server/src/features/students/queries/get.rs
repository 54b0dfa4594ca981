use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Student;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStudentQuery {
    pub id: i64,
}

pub type GetStudentResponse = Student;

#[derive(Debug, thiserror::Error)]
pub enum GetStudentError {
    #[error("Student with id {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetStudentResponse, GetStudentError>> for GetStudentQuery {}

impl crate::cqrs::middleware::Query for GetStudentQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetStudentQuery,
) -> Result<GetStudentResponse, GetStudentError> {
    let sql = format!("SELECT {} FROM students WHERE id = $1", Student::COLUMNS);
    sqlx::query_as::<_, Student>(&sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetStudentError::NotFound(query.id))
}
