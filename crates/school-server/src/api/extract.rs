//! Request body extraction
//!
//! [`Json`] wraps `axum::Json` so a body that is not valid JSON, or does not
//! match the command's field types, is answered with the standard
//! `VALIDATION_ERROR` envelope instead of axum's plain-text rejection.

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::AppError;
use crate::features::shared::validation::{
    ValidationError, CLASS_RULES, STUDENT_RULES, TEACHER_RULES,
};

/// JSON request body whose rejections convert into [`AppError::Validation`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

/// Body fields without an entry in any rule table
const UNRULED_FIELDS: &[&str] = &["classId"];

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = match rejection {
            JsonRejection::JsonDataError(_) => rejected_field(&message),
            _ => None,
        };

        tracing::debug!(%message, "Rejected request body");

        AppError::Validation(ValidationError { field, message })
    }
}

/// Wire name of the field a data error points at
///
/// Data errors read `...target type: <path>: <reason>`; only top-level
/// paths naming a known body field are reported.
fn rejected_field(text: &str) -> Option<&'static str> {
    let (_, detail) = text.split_once("target type: ")?;
    let (path, _) = detail.split_once(": ")?;

    STUDENT_RULES
        .iter()
        .chain(TEACHER_RULES)
        .chain(CLASS_RULES)
        .map(|entry| entry.field)
        .chain(UNRULED_FIELDS.iter().copied())
        .find(|field| *field == path)
}
