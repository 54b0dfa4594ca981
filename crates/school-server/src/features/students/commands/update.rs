//! Update student command
//!
//! Partially updates an existing student. Only supplied fields are validated
//! and changed; the rest keep their stored values.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::{
    error_helpers::map_unique_violation,
    integrity::{lock_class, value_taken},
    nullable,
    validation::{merged, require_date, validate_supplied, ValidationError, STUDENT_RULES},
};
use crate::models::Student;

const ENROLLMENT_NUMBER_KEY: &str = "students_enrollment_number_key";

/// Command to update an existing student
///
/// `id` comes from the request path. `classId: null` unassigns the student;
/// an absent `classId` leaves the assignment unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentCommand {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStudentResponse {
    pub message: String,
    pub student: Student,
}

/// Errors that can occur when updating a student
#[derive(Debug, thiserror::Error)]
pub enum UpdateStudentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Student with id {0} not found")]
    NotFound(i64),

    #[error("Class with id {0} not found")]
    ClassNotFound(i64),

    #[error("Student with enrollment number '{0}' already exists")]
    DuplicateEnrollmentNumber(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UpdateStudentResponse, UpdateStudentError>> for UpdateStudentCommand {}

impl crate::cqrs::middleware::Command for UpdateStudentCommand {}

impl UpdateStudentCommand {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "birthDate" => self.birth_date.as_deref(),
            "phone" => self.phone.as_deref(),
            "email" => self.email.as_deref(),
            "enrollmentNumber" => self.enrollment_number.as_deref(),
            _ => None,
        }
    }

    /// Validates the supplied fields against [`STUDENT_RULES`]
    ///
    /// # Errors
    ///
    /// Fails when a supplied field breaks a rule, or when no field at all
    /// was supplied.
    pub fn validate(&self) -> Result<(), UpdateStudentError> {
        validate_supplied(STUDENT_RULES, |f| self.field(f), self.class_id.is_some())?;
        Ok(())
    }
}

/// Handles the update student command
///
/// The stored row is locked for the duration of the transaction. Class
/// existence is only re-checked when the class reference changes.
///
/// # Errors
///
/// - `Validation` - A supplied field failed its rules, or nothing was supplied
/// - `NotFound` - No student has the given id
/// - `ClassNotFound` - The new `classId` references a missing class
/// - `DuplicateEnrollmentNumber` - Another student holds the enrollment number
/// - `Database` - The write failed
#[tracing::instrument(skip(pool, command), fields(student_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateStudentCommand,
) -> Result<UpdateStudentResponse, UpdateStudentError> {
    command.validate()?;

    let birth_date = command
        .birth_date
        .as_deref()
        .map(|d| require_date("birthDate", d))
        .transpose()?;

    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, Student>(&format!(
        "SELECT {} FROM students WHERE id = $1 FOR UPDATE",
        Student::COLUMNS
    ))
    .bind(command.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(UpdateStudentError::NotFound(command.id))?;

    let class_id = command.class_id.unwrap_or(current.class_id);
    if let Some(new_class_id) = class_id {
        if class_id != current.class_id && !lock_class(&mut tx, new_class_id).await? {
            return Err(UpdateStudentError::ClassNotFound(new_class_id));
        }
    }

    let enrollment_number = merged(
        command.enrollment_number.as_deref(),
        current.enrollment_number.clone(),
    );
    if enrollment_number != current.enrollment_number
        && value_taken(
            &mut tx,
            "students",
            "enrollment_number",
            &enrollment_number,
            Some(command.id),
        )
        .await?
    {
        return Err(UpdateStudentError::DuplicateEnrollmentNumber(enrollment_number));
    }

    let student = sqlx::query_as::<_, Student>(&format!(
        "UPDATE students \
         SET name = $2, birth_date = $3, phone = $4, email = $5, enrollment_number = $6, \
             class_id = $7, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {}",
        Student::COLUMNS
    ))
    .bind(command.id)
    .bind(merged(command.name.as_deref(), current.name))
    .bind(birth_date.unwrap_or(current.birth_date))
    .bind(merged(command.phone.as_deref(), current.phone))
    .bind(merged(command.email.as_deref(), current.email))
    .bind(&enrollment_number)
    .bind(class_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            ENROLLMENT_NUMBER_KEY,
            UpdateStudentError::DuplicateEnrollmentNumber(enrollment_number.clone()),
            UpdateStudentError::Database,
        )
    })?;

    tx.commit().await?;

    tracing::info!("Student updated successfully");

    Ok(UpdateStudentResponse {
        message: "Student updated successfully".to_string(),
        student,
    })
}
