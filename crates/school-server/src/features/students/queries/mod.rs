pub mod get;
pub mod list;
pub mod list_by_class;

pub use get::{GetStudentError, GetStudentQuery, GetStudentResponse};
pub use list::{ListStudentsError, ListStudentsQuery, ListStudentsResponse};
pub use list_by_class::{
    ListStudentsByClassError, ListStudentsByClassQuery, ListStudentsByClassResponse,
};
