use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Class;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetClassQuery {
    pub id: i64,
}

pub type GetClassResponse = Class;

#[derive(Debug, thiserror::Error)]
pub enum GetClassError {
    #[error("Class with id {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetClassResponse, GetClassError>> for GetClassQuery {}

impl crate::cqrs::middleware::Query for GetClassQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetClassQuery) -> Result<GetClassResponse, GetClassError> {
    sqlx::query_as::<_, Class>(&format!("SELECT {} FROM classes WHERE id = $1", Class::COLUMNS))
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetClassError::NotFound(query.id))
}
