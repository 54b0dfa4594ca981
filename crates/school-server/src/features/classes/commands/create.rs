//! Create class command

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::{
    error_helpers::map_unique_violation,
    integrity::value_taken,
    validation::{normalize, validate_record, ValidationError, CLASS_RULES},
};
use crate::models::Class;

pub(crate) const CLASS_CODE_KEY: &str = "classes_class_code_key";

/// Command to create a new class
///
/// # Examples
///
/// ```rust,ignore
/// use school_server::features::classes::commands::CreateClassCommand;
///
/// let command = CreateClassCommand {
///     class_code: Some("T1".to_string()),
///     shift: Some("evening".to_string()),
///     subject: Some("math".to_string()),
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassCommand {
    /// Must be unique across all classes
    pub class_code: Option<String>,
    pub shift: Option<String>,
    pub subject: Option<String>,
}

pub type CreateClassResponse = Class;

#[derive(Debug, thiserror::Error)]
pub enum CreateClassError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Class with code '{0}' already exists")]
    DuplicateClassCode(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateClassResponse, CreateClassError>> for CreateClassCommand {}

impl crate::cqrs::middleware::Command for CreateClassCommand {}

impl CreateClassCommand {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "classCode" => self.class_code.as_deref(),
            "shift" => self.shift.as_deref(),
            "subject" => self.subject.as_deref(),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), CreateClassError> {
        validate_record(CLASS_RULES, |f| self.field(f))?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(class_code = ?command.class_code))]
pub async fn handle(
    pool: PgPool,
    command: CreateClassCommand,
) -> Result<CreateClassResponse, CreateClassError> {
    command.validate()?;

    let class_code = normalize(command.class_code.as_deref());

    let mut tx = pool.begin().await?;

    if value_taken(&mut tx, "classes", "class_code", &class_code, None).await? {
        return Err(CreateClassError::DuplicateClassCode(class_code));
    }

    let class = sqlx::query_as::<_, Class>(&format!(
        "INSERT INTO classes (class_code, shift, subject) VALUES ($1, $2, $3) RETURNING {}",
        Class::COLUMNS
    ))
    .bind(&class_code)
    .bind(normalize(command.shift.as_deref()))
    .bind(normalize(command.subject.as_deref()))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            CLASS_CODE_KEY,
            CreateClassError::DuplicateClassCode(class_code.clone()),
            CreateClassError::Database,
        )
    })?;

    tx.commit().await?;

    tracing::info!(class_id = class.id, "Class created successfully");

    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateClassCommand {
        CreateClassCommand {
            class_code: Some("T1".to_string()),
            shift: Some("evening".to_string()),
            subject: Some("math".to_string()),
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_each_field_required() {
        for (field, cmd) in [
            ("classCode", CreateClassCommand { class_code: None, ..valid() }),
            ("shift", CreateClassCommand { shift: Some(" ".to_string()), ..valid() }),
            ("subject", CreateClassCommand { subject: Some(String::new()), ..valid() }),
        ] {
            match cmd.validate() {
                Err(CreateClassError::Validation(e)) => {
                    assert_eq!(e.field, Some(field));
                    assert_eq!(e.message, format!("{} is required", field));
                },
                other => panic!("expected validation error for {}, got {:?}", field, other),
            }
        }
    }
}
