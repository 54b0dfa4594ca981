//! Create teacher command
//!
//! A teacher may be linked to one class. The class must exist and must not
//! already have a teacher; the email must not belong to another teacher.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::{
    error_helpers::unique_constraint,
    integrity::{class_has_teacher, lock_class, value_taken},
    validation::{normalize, require_date, validate_record, ValidationError, TEACHER_RULES},
};
use crate::models::Teacher;

pub(crate) const EMAIL_KEY: &str = "teachers_email_key";
pub(crate) const CLASS_KEY: &str = "teachers_class_id_key";

/// Command to create a new teacher
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherCommand {
    pub name: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub phone: Option<String>,
    /// Must be unique across all teachers
    pub email: Option<String>,
    pub class_id: Option<i64>,
}

pub type CreateTeacherResponse = Teacher;

/// Errors that can occur when creating a teacher
#[derive(Debug, thiserror::Error)]
pub enum CreateTeacherError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Class with id {0} not found")]
    ClassNotFound(i64),

    #[error("Teacher with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Class with id {0} already has a teacher")]
    ClassAlreadyAssigned(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateTeacherResponse, CreateTeacherError>> for CreateTeacherCommand {}

impl crate::cqrs::middleware::Command for CreateTeacherCommand {}

impl CreateTeacherCommand {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "birthDate" => self.birth_date.as_deref(),
            "phone" => self.phone.as_deref(),
            "email" => self.email.as_deref(),
            _ => None,
        }
    }

    /// Validates the command against [`TEACHER_RULES`]
    pub fn validate(&self) -> Result<(), CreateTeacherError> {
        validate_record(TEACHER_RULES, |f| self.field(f))?;
        Ok(())
    }
}

/// Handler function for creating teachers
///
/// # Errors
///
/// - `Validation` - A field failed its rules
/// - `ClassNotFound` - `classId` was given but no such class exists
/// - `ClassAlreadyAssigned` - Another teacher already teaches that class
/// - `DuplicateEmail` - Another teacher has the email
/// - `Database` - The write failed
#[tracing::instrument(skip(pool, command), fields(class_id = ?command.class_id))]
pub async fn handle(
    pool: PgPool,
    command: CreateTeacherCommand,
) -> Result<CreateTeacherResponse, CreateTeacherError> {
    command.validate()?;

    let birth_date = require_date("birthDate", command.birth_date.as_deref().unwrap_or_default())?;
    let email = normalize(command.email.as_deref());

    let mut tx = pool.begin().await?;

    if let Some(class_id) = command.class_id {
        if !lock_class(&mut tx, class_id).await? {
            return Err(CreateTeacherError::ClassNotFound(class_id));
        }
        if class_has_teacher(&mut tx, class_id, None).await? {
            return Err(CreateTeacherError::ClassAlreadyAssigned(class_id));
        }
    }

    if value_taken(&mut tx, "teachers", "email", &email, None).await? {
        return Err(CreateTeacherError::DuplicateEmail(email));
    }

    tracing::info!("Creating teacher");

    let teacher = sqlx::query_as::<_, Teacher>(&format!(
        "INSERT INTO teachers (name, birth_date, phone, email, class_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {}",
        Teacher::COLUMNS
    ))
    .bind(normalize(command.name.as_deref()))
    .bind(birth_date)
    .bind(normalize(command.phone.as_deref()))
    .bind(&email)
    .bind(command.class_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match unique_constraint(&e) {
        Some(EMAIL_KEY) => CreateTeacherError::DuplicateEmail(email.clone()),
        Some(CLASS_KEY) => {
            CreateTeacherError::ClassAlreadyAssigned(command.class_id.unwrap_or_default())
        },
        _ => CreateTeacherError::Database(e),
    })?;

    tx.commit().await?;

    tracing::info!(teacher_id = teacher.id, "Teacher created successfully");

    Ok(teacher)
}
