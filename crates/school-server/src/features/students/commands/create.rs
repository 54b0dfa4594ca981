//! Create student command
//!
//! Validates the raw fields against the student rule table, then inserts the
//! row inside one transaction that also confirms the referenced class exists
//! and that the enrollment number is free.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::{
    error_helpers::map_unique_violation,
    integrity::{lock_class, value_taken},
    validation::{normalize, require_date, validate_record, ValidationError, STUDENT_RULES},
};
use crate::models::Student;

const ENROLLMENT_NUMBER_KEY: &str = "students_enrollment_number_key";

/// Command to create a new student
///
/// Every field except `classId` is required. Fields are optional here so a
/// missing value surfaces as a [`ValidationError`] naming that field.
///
/// # Examples
///
/// ```rust,ignore
/// use school_server::features::students::commands::CreateStudentCommand;
///
/// let command = CreateStudentCommand {
///     name: Some("Ana Silva".to_string()),
///     birth_date: Some("2005-01-01".to_string()),
///     phone: Some("11999999999".to_string()),
///     email: Some("ana@x.com".to_string()),
///     enrollment_number: Some("E001".to_string()),
///     class_id: None,
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentCommand {
    pub name: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Must be unique across all students
    pub enrollment_number: Option<String>,
    /// Class to enroll the student in; must exist when given
    pub class_id: Option<i64>,
}

pub type CreateStudentResponse = Student;

/// Errors that can occur when creating a student
#[derive(Debug, thiserror::Error)]
pub enum CreateStudentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Class with id {0} not found")]
    ClassNotFound(i64),

    #[error("Student with enrollment number '{0}' already exists")]
    DuplicateEnrollmentNumber(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateStudentResponse, CreateStudentError>> for CreateStudentCommand {}

impl crate::cqrs::middleware::Command for CreateStudentCommand {}

impl CreateStudentCommand {
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

    /// Validates the command against [`STUDENT_RULES`]
    ///
    /// # Errors
    ///
    /// Returns the first violated rule in table order.
    pub fn validate(&self) -> Result<(), CreateStudentError> {
        validate_record(STUDENT_RULES, |f| self.field(f))?;
        Ok(())
    }
}

/// Handler function for creating students
///
/// # Errors
///
/// - `Validation` - A field failed its rules
/// - `ClassNotFound` - `classId` was given but no such class exists
/// - `DuplicateEnrollmentNumber` - Another student holds the enrollment number
/// - `Database` - The write failed
#[tracing::instrument(
    skip(pool, command),
    fields(
        enrollment_number = ?command.enrollment_number,
        class_id = ?command.class_id
    )
)]
pub async fn handle(
    pool: PgPool,
    command: CreateStudentCommand,
) -> Result<CreateStudentResponse, CreateStudentError> {
    command.validate()?;

    let birth_date = require_date("birthDate", command.birth_date.as_deref().unwrap_or_default())?;
    let enrollment_number = normalize(command.enrollment_number.as_deref());

    let mut tx = pool.begin().await?;

    if let Some(class_id) = command.class_id {
        if !lock_class(&mut tx, class_id).await? {
            return Err(CreateStudentError::ClassNotFound(class_id));
        }
    }

    if value_taken(&mut tx, "students", "enrollment_number", &enrollment_number, None).await? {
        return Err(CreateStudentError::DuplicateEnrollmentNumber(enrollment_number));
    }

    tracing::info!("Creating student");

    let student = sqlx::query_as::<_, Student>(&format!(
        "INSERT INTO students (name, birth_date, phone, email, enrollment_number, class_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {}",
        Student::COLUMNS
    ))
    .bind(normalize(command.name.as_deref()))
    .bind(birth_date)
    .bind(normalize(command.phone.as_deref()))
    .bind(normalize(command.email.as_deref()))
    .bind(&enrollment_number)
    .bind(command.class_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            ENROLLMENT_NUMBER_KEY,
            CreateStudentError::DuplicateEnrollmentNumber(enrollment_number.clone()),
            CreateStudentError::Database,
        )
    })?;

    tx.commit().await?;

    tracing::info!(student_id = student.id, "Student created successfully");

    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateStudentCommand {
        CreateStudentCommand {
            name: Some("Ana Silva".to_string()),
            birth_date: Some("2005-01-01".to_string()),
            phone: Some("11999999999".to_string()),
            email: Some("ana@x.com".to_string()),
            enrollment_number: Some("E001".to_string()),
            class_id: None,
        }
    }

    fn invalid_field(cmd: CreateStudentCommand) -> Option<&'static str> {
        match cmd.validate() {
            Err(CreateStudentError::Validation(e)) => e.field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(valid().validate().is_ok());
        assert!(CreateStudentCommand {
            class_id: Some(3),
            ..valid()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_validation_missing_enrollment_number() {
        let cmd = CreateStudentCommand {
            enrollment_number: None,
            ..valid()
        };
        assert_eq!(invalid_field(cmd), Some("enrollmentNumber"));
    }

    #[test]
    fn test_validation_blank_name() {
        let cmd = CreateStudentCommand {
            name: Some("  ".to_string()),
            ..valid()
        };
        assert_eq!(invalid_field(cmd), Some("name"));
    }

    #[test]
    fn test_validation_invalid_birth_date() {
        let cmd = CreateStudentCommand {
            birth_date: Some("2005-02-30".to_string()),
            ..valid()
        };
        assert_eq!(invalid_field(cmd), Some("birthDate"));
    }

    #[test]
    fn test_validation_phone_too_long() {
        let cmd = CreateStudentCommand {
            phone: Some("1".repeat(19)),
            ..valid()
        };
        assert_eq!(invalid_field(cmd), Some("phone"));
    }

    #[test]
    fn test_validation_invalid_email() {
        let cmd = CreateStudentCommand {
            email: Some("ana.x.com".to_string()),
            ..valid()
        };
        assert_eq!(invalid_field(cmd), Some("email"));
    }

    #[test]
    fn test_deserializes_camel_case() {
        let cmd: CreateStudentCommand = serde_json::from_str(
            r#"{"name":"Ana","birthDate":"2005-01-01","enrollmentNumber":"E1","classId":4}"#,
        )
        .unwrap();
        assert_eq!(cmd.birth_date.as_deref(), Some("2005-01-01"));
        assert_eq!(cmd.enrollment_number.as_deref(), Some("E1"));
        assert_eq!(cmd.class_id, Some(4));
        assert_eq!(cmd.phone, None);
    }
}
