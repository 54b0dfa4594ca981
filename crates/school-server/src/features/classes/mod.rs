pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateClassCommand, CreateClassError, CreateClassResponse, DeleteClassCommand,
    DeleteClassError, DeleteClassResponse, UpdateClassCommand, UpdateClassError,
    UpdateClassResponse,
};

pub use queries::{
    GetClassError, GetClassQuery, GetClassResponse, ListClassesError, ListClassesQuery,
    ListClassesResponse,
};

pub use routes::classes_routes;
