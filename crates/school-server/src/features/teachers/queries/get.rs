use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Teacher;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTeacherQuery {
    pub id: i64,
}

pub type GetTeacherResponse = Teacher;

#[derive(Debug, thiserror::Error)]
pub enum GetTeacherError {
    #[error("Teacher with id {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetTeacherResponse, GetTeacherError>> for GetTeacherQuery {}

impl crate::cqrs::middleware::Query for GetTeacherQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetTeacherQuery,
) -> Result<GetTeacherResponse, GetTeacherError> {
    let sql = format!("SELECT {} FROM teachers WHERE id = $1", Teacher::COLUMNS);
    sqlx::query_as::<_, Teacher>(&sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetTeacherError::NotFound(query.id))
}
