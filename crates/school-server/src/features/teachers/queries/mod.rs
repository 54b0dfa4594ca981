pub mod get;
pub mod list;

pub use get::{GetTeacherError, GetTeacherQuery, GetTeacherResponse};
pub use list::{ListTeachersError, ListTeachersQuery, ListTeachersResponse};
