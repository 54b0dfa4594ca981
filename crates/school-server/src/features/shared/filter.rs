//! Conjunctive list filters
//!
//! A [`Filter`] collects optional request parameters into a list of
//! conditions, each contributing one bound-parameter predicate. Absent and
//! blank values contribute nothing, so an empty filter matches every row.
//!
//! ```rust,ignore
//! let filter = Filter::new()
//!     .contains("name", query.name.as_deref())
//!     .id("class_id", "classId", query.class_id.as_deref())?;
//!
//! let mut qb = QueryBuilder::new("SELECT * FROM students");
//! filter.push_where(&mut qb);
//! qb.push(" ORDER BY id");
//! ```

use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

use super::validation::{require_date, ValidationError};

/// Bound value of a filter condition
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Date(NaiveDate),
    Id(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = value`
    Equals {
        column: &'static str,
        value: FilterValue,
    },
    /// Case-sensitive substring match on a text column
    Contains { column: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equality on a text column
    pub fn text(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = present(value) {
            self.conditions.push(Condition::Equals {
                column,
                value: FilterValue::Text(value.to_string()),
            });
        }
        self
    }

    /// Substring match on a text column
    pub fn contains(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = present(value) {
            self.conditions.push(Condition::Contains {
                column,
                value: value.to_string(),
            });
        }
        self
    }

    /// Equality on a date column; `field` names the parameter in errors
    pub fn date(
        mut self,
        column: &'static str,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if let Some(value) = present(value) {
            self.conditions.push(Condition::Equals {
                column,
                value: FilterValue::Date(require_date(field, value)?),
            });
        }
        Ok(self)
    }

    /// Equality on an id column; `field` names the parameter in errors
    pub fn id(
        mut self,
        column: &'static str,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if let Some(value) = present(value) {
            let id = value.parse::<i64>().map_err(|_| {
                ValidationError::new(field, format!("{} must be an integer", field))
            })?;
            self.conditions.push(Condition::Equals {
                column,
                value: FilterValue::Id(id),
            });
        }
        Ok(self)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append ` WHERE c1 AND c2 ...` with every value bound
    ///
    /// Pushes nothing when the filter is empty.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, condition) in self.conditions.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            match condition {
                Condition::Equals { column, value } => {
                    qb.push(*column).push(" = ");
                    match value {
                        FilterValue::Text(v) => qb.push_bind(v.clone()),
                        FilterValue::Date(v) => qb.push_bind(*v),
                        FilterValue::Id(v) => qb.push_bind(*v),
                    };
                },
                Condition::Contains { column, value } => {
                    qb.push("strpos(").push(*column).push(", ");
                    qb.push_bind(value.clone());
                    qb.push(") > 0");
                },
            }
        }
    }
}
