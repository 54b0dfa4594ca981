//! Update class command

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::create::CLASS_CODE_KEY;
use crate::features::shared::{
    error_helpers::map_unique_violation,
    integrity::value_taken,
    validation::{merged, validate_supplied, ValidationError, CLASS_RULES},
};
use crate::models::Class;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClassResponse {
    pub message: String,
    pub class: Class,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateClassError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Class with id {0} not found")]
    NotFound(i64),

    #[error("Class with code '{0}' already exists")]
    DuplicateClassCode(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UpdateClassResponse, UpdateClassError>> for UpdateClassCommand {}

impl crate::cqrs::middleware::Command for UpdateClassCommand {}

impl UpdateClassCommand {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "classCode" => self.class_code.as_deref(),
            "shift" => self.shift.as_deref(),
            "subject" => self.subject.as_deref(),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), UpdateClassError> {
        validate_supplied(CLASS_RULES, |f| self.field(f), false)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(class_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateClassCommand,
) -> Result<UpdateClassResponse, UpdateClassError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    // NO KEY UPDATE leaves the class lockable by student and teacher writes.
    // Changing class_code is a key update and waits for those writes.
    let current = sqlx::query_as::<_, Class>(&format!(
        "SELECT {} FROM classes WHERE id = $1 FOR NO KEY UPDATE",
        Class::COLUMNS
    ))
    .bind(command.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(UpdateClassError::NotFound(command.id))?;

    let class_code = merged(command.class_code.as_deref(), current.class_code.clone());
    if class_code != current.class_code
        && value_taken(&mut tx, "classes", "class_code", &class_code, Some(command.id)).await?
    {
        return Err(UpdateClassError::DuplicateClassCode(class_code));
    }

    let class = sqlx::query_as::<_, Class>(&format!(
        "UPDATE classes SET class_code = $2, shift = $3, subject = $4, updated_at = NOW() \
         WHERE id = $1 RETURNING {}",
        Class::COLUMNS
    ))
    .bind(command.id)
    .bind(&class_code)
    .bind(merged(command.shift.as_deref(), current.shift))
    .bind(merged(command.subject.as_deref(), current.subject))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            CLASS_CODE_KEY,
            UpdateClassError::DuplicateClassCode(class_code.clone()),
            UpdateClassError::Database,
        )
    })?;

    tx.commit().await?;

    tracing::info!("Class updated successfully");

    Ok(UpdateClassResponse {
        message: "Class updated successfully".to_string(),
        class,
    })
}
