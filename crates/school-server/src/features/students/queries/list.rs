use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, QueryBuilder};

use crate::features::shared::{Filter, ValidationError};
use crate::models::Student;

/// Optional list filters, all AND-ed together
///
/// `name` matches as a case-sensitive substring; every other filter is an
/// exact match. Values arrive as raw query-string text so malformed dates
/// and ids are reported as validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
}

pub type ListStudentsResponse = Vec<Student>;

#[derive(Debug, thiserror::Error)]
pub enum ListStudentsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListStudentsResponse, ListStudentsError>> for ListStudentsQuery {}

impl crate::cqrs::middleware::Query for ListStudentsQuery {}

impl ListStudentsQuery {
    pub fn filter(&self) -> Result<Filter, ListStudentsError> {
        let filter = Filter::new()
            .contains("name", self.name.as_deref())
            .date("birth_date", "birthDate", self.birth_date.as_deref())?
            .text("phone", self.phone.as_deref())
            .text("email", self.email.as_deref())
            .text("enrollment_number", self.enrollment_number.as_deref())
            .id("class_id", "classId", self.class_id.as_deref())?;
        Ok(filter)
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListStudentsQuery,
) -> Result<ListStudentsResponse, ListStudentsError> {
    let filter = query.filter()?;

    let mut qb = QueryBuilder::new(format!("SELECT {} FROM students", Student::COLUMNS));
    filter.push_where(&mut qb);
    qb.push(" ORDER BY id");

    let students = qb.build_query_as::<Student>().fetch_all(&pool).await?;

    tracing::debug!(count = students.len(), "Students listed");

    Ok(students)
}
