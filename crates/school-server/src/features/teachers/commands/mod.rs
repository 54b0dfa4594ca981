pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateTeacherCommand, CreateTeacherError, CreateTeacherResponse};
pub use delete::{DeleteTeacherCommand, DeleteTeacherError, DeleteTeacherResponse};
pub use update::{UpdateTeacherCommand, UpdateTeacherError, UpdateTeacherResponse};
