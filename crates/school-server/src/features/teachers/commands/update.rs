//! Update teacher command

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::create::{CLASS_KEY, EMAIL_KEY};
use crate::features::shared::{
    error_helpers::unique_constraint,
    integrity::{class_has_teacher, lock_class, value_taken},
    nullable,
    validation::{merged, require_date, validate_supplied, ValidationError, TEACHER_RULES},
};
use crate::models::Teacher;

/// Command to update an existing teacher
///
/// `id` comes from the request path. `classId: null` unlinks the teacher
/// from its class; an absent `classId` leaves the link unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTeacherResponse {
    pub message: String,
    pub teacher: Teacher,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateTeacherError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Teacher with id {0} not found")]
    NotFound(i64),

    #[error("Class with id {0} not found")]
    ClassNotFound(i64),

    #[error("Teacher with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Class with id {0} already has a teacher")]
    ClassAlreadyAssigned(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UpdateTeacherResponse, UpdateTeacherError>> for UpdateTeacherCommand {}

impl crate::cqrs::middleware::Command for UpdateTeacherCommand {}

impl UpdateTeacherCommand {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "birthDate" => self.birth_date.as_deref(),
            "phone" => self.phone.as_deref(),
            "email" => self.email.as_deref(),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), UpdateTeacherError> {
        validate_supplied(TEACHER_RULES, |f| self.field(f), self.class_id.is_some())?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(teacher_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateTeacherCommand,
) -> Result<UpdateTeacherResponse, UpdateTeacherError> {
    command.validate()?;

    let birth_date = command
        .birth_date
        .as_deref()
        .map(|d| require_date("birthDate", d))
        .transpose()?;

    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, Teacher>(&format!(
        "SELECT {} FROM teachers WHERE id = $1 FOR UPDATE",
        Teacher::COLUMNS
    ))
    .bind(command.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(UpdateTeacherError::NotFound(command.id))?;

    let class_id = command.class_id.unwrap_or(current.class_id);
    if let Some(new_class_id) = class_id {
        if class_id != current.class_id {
            if !lock_class(&mut tx, new_class_id).await? {
                return Err(UpdateTeacherError::ClassNotFound(new_class_id));
            }
            if class_has_teacher(&mut tx, new_class_id, Some(command.id)).await? {
                return Err(UpdateTeacherError::ClassAlreadyAssigned(new_class_id));
            }
        }
    }

    let email = merged(command.email.as_deref(), current.email.clone());
    if email != current.email
        && value_taken(&mut tx, "teachers", "email", &email, Some(command.id)).await?
    {
        return Err(UpdateTeacherError::DuplicateEmail(email));
    }

    let teacher = sqlx::query_as::<_, Teacher>(&format!(
        "UPDATE teachers \
         SET name = $2, birth_date = $3, phone = $4, email = $5, class_id = $6, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {}",
        Teacher::COLUMNS
    ))
    .bind(command.id)
    .bind(merged(command.name.as_deref(), current.name))
    .bind(birth_date.unwrap_or(current.birth_date))
    .bind(merged(command.phone.as_deref(), current.phone))
    .bind(&email)
    .bind(class_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match unique_constraint(&e) {
        Some(EMAIL_KEY) => UpdateTeacherError::DuplicateEmail(email.clone()),
        Some(CLASS_KEY) => UpdateTeacherError::ClassAlreadyAssigned(class_id.unwrap_or_default()),
        _ => UpdateTeacherError::Database(e),
    })?;

    tx.commit().await?;

    tracing::info!("Teacher updated successfully");

    Ok(UpdateTeacherResponse {
        message: "Teacher updated successfully".to_string(),
        teacher,
    })
}
