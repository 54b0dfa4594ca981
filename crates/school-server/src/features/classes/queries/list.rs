use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, QueryBuilder};

use crate::features::shared::Filter;
use crate::models::Class;

/// Exact-match filters on the class fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClassesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

pub type ListClassesResponse = Vec<Class>;

#[derive(Debug, thiserror::Error)]
pub enum ListClassesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListClassesResponse, ListClassesError>> for ListClassesQuery {}

impl crate::cqrs::middleware::Query for ListClassesQuery {}

impl ListClassesQuery {
    pub fn filter(&self) -> Filter {
        Filter::new()
            .text("class_code", self.class_code.as_deref())
            .text("shift", self.shift.as_deref())
            .text("subject", self.subject.as_deref())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListClassesQuery,
) -> Result<ListClassesResponse, ListClassesError> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM classes", Class::COLUMNS));
    query.filter().push_where(&mut qb);
    qb.push(" ORDER BY id");

    let classes = qb.build_query_as::<Class>().fetch_all(&pool).await?;

    tracing::debug!(count = classes.len(), "Classes listed");

    Ok(classes)
}
