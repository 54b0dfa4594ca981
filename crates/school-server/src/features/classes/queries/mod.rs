pub mod get;
pub mod list;

pub use get::{GetClassError, GetClassQuery, GetClassResponse};
pub use list::{ListClassesError, ListClassesQuery, ListClassesResponse};
