//! Database error handling utilities
//!
//! Classifies storage constraint violations so commands can map them onto
//! their own conflict variants. Unique violations carry the constraint name,
//! which tells apart the two unique keys on `teachers`, for example.
//!
//! # Examples
//!
//! ```rust,ignore
//! use school_server::features::shared::error_helpers::unique_constraint;
//!
//! match unique_constraint(&err) {
//!     Some("teachers_email_key") => ...,
//!     Some("teachers_class_id_key") => ...,
//!     _ => ...,
//! }
//! ```

use sqlx::Error as SqlxError;

/// Check if the error is a unique constraint violation
pub fn is_unique_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_unique_violation();
    }
    false
}

/// Name of the constraint a database error reports, if any
pub fn violated_constraint(error: &SqlxError) -> Option<&str> {
    match error {
        SqlxError::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

/// Name of the unique constraint a database error violated
///
/// `None` for every other error.
pub fn unique_constraint(error: &SqlxError) -> Option<&str> {
    if is_unique_violation(error) {
        violated_constraint(error)
    } else {
        None
    }
}

/// Map a unique violation on `constraint` to `unique_error`
///
/// Any other error (including a unique violation on a different constraint)
/// is passed to `default_wrapper`.
pub fn map_unique_violation<E, F>(
    error: SqlxError,
    constraint: &str,
    unique_error: E,
    default_wrapper: F,
) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if unique_constraint(&error) == Some(constraint) {
        unique_error
    } else {
        default_wrapper(error)
    }
}
