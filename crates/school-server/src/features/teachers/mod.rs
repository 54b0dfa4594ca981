pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateTeacherCommand, CreateTeacherError, CreateTeacherResponse, DeleteTeacherCommand,
    DeleteTeacherError, DeleteTeacherResponse, UpdateTeacherCommand, UpdateTeacherError,
    UpdateTeacherResponse,
};

pub use queries::{
    GetTeacherError, GetTeacherQuery, GetTeacherResponse, ListTeachersError, ListTeachersQuery,
    ListTeachersResponse,
};

pub use routes::teachers_routes;
