pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateStudentCommand, CreateStudentError, CreateStudentResponse, DeleteStudentCommand,
    DeleteStudentError, DeleteStudentResponse, UpdateStudentCommand, UpdateStudentError,
    UpdateStudentResponse,
};

pub use queries::{
    GetStudentError, GetStudentQuery, GetStudentResponse, ListStudentsByClassError,
    ListStudentsByClassQuery, ListStudentsByClassResponse, ListStudentsError, ListStudentsQuery,
    ListStudentsResponse,
};

pub use routes::students_routes;
