use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, QueryBuilder};

use crate::features::shared::{Filter, ValidationError};
use crate::models::Teacher;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeachersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
}

pub type ListTeachersResponse = Vec<Teacher>;

#[derive(Debug, thiserror::Error)]
pub enum ListTeachersError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListTeachersResponse, ListTeachersError>> for ListTeachersQuery {}

impl crate::cqrs::middleware::Query for ListTeachersQuery {}

impl ListTeachersQuery {
    pub fn filter(&self) -> Result<Filter, ListTeachersError> {
        let filter = Filter::new()
            .contains("name", self.name.as_deref())
            .date("birth_date", "birthDate", self.birth_date.as_deref())?
            .text("phone", self.phone.as_deref())
            .text("email", self.email.as_deref())
            .id("class_id", "classId", self.class_id.as_deref())?;
        Ok(filter)
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListTeachersQuery,
) -> Result<ListTeachersResponse, ListTeachersError> {
    let filter = query.filter()?;

    let mut qb = QueryBuilder::new(format!("SELECT {} FROM teachers", Teacher::COLUMNS));
    filter.push_where(&mut qb);
    qb.push(" ORDER BY id");

    let teachers = qb.build_query_as::<Teacher>().fetch_all(&pool).await?;

    tracing::debug!(count = teachers.len(), "Teachers listed");

    Ok(teachers)
}
