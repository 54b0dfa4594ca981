pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateStudentCommand, CreateStudentError, CreateStudentResponse};
pub use delete::{DeleteStudentCommand, DeleteStudentError, DeleteStudentResponse};
pub use update::{UpdateStudentCommand, UpdateStudentError, UpdateStudentResponse};
