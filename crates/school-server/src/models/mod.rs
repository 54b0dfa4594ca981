//! Database models
//!
//! Rows map one-to-one onto the `students`, `teachers` and `classes` tables
//! and serialize with camelCase keys. `birthDate` serializes as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub email: String,
    pub enrollment_number: String,
    /// May reference a class that has since been deleted
    pub class_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub const COLUMNS: &'static str =
        "id, name, birth_date, phone, email, enrollment_number, class_id, created_at, updated_at";
}

/// Teacher model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub email: String,
    /// The class this teacher teaches; at most one teacher per class
    pub class_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub const COLUMNS: &'static str =
        "id, name, birth_date, phone, email, class_id, created_at, updated_at";
}

/// Class (section) model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: i64,
    pub class_code: String,
    pub shift: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Class {
    pub const COLUMNS: &'static str = "id, class_code, shift, subject, created_at, updated_at";
}
