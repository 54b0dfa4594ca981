use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::integrity::class_exists;
use crate::models::Student;

/// Students enrolled in one class, ordered by id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsByClassQuery {
    pub class_id: i64,
}

pub type ListStudentsByClassResponse = Vec<Student>;

#[derive(Debug, thiserror::Error)]
pub enum ListStudentsByClassError {
    #[error("Class with id {0} not found")]
    ClassNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListStudentsByClassResponse, ListStudentsByClassError>>
    for ListStudentsByClassQuery
{
}

impl crate::cqrs::middleware::Query for ListStudentsByClassQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListStudentsByClassQuery,
) -> Result<ListStudentsByClassResponse, ListStudentsByClassError> {
    let mut conn = pool.acquire().await?;

    if !class_exists(&mut conn, query.class_id).await? {
        return Err(ListStudentsByClassError::ClassNotFound(query.class_id));
    }

    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {} FROM students WHERE class_id = $1 ORDER BY id",
        Student::COLUMNS
    ))
    .bind(query.class_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(students)
}
