//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **validation**: Rule tables and the field validator
//! - **filter**: Conjunctive list filters built on `QueryBuilder`
//! - **integrity**: Class reference and uniqueness checks run inside write transactions
//! - **error_helpers**: Database error handling utilities
//! - **nullable**: Deserializing fields where `null` and absent differ

pub mod error_helpers;
pub mod filter;
pub mod integrity;
pub mod nullable;
pub mod validation;

pub use filter::Filter;
pub use validation::{ValidationError, CLASS_RULES, STUDENT_RULES, TEACHER_RULES};
