//! Feature modules implementing the school registry API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes.
//!
//! # Features
//!
//! - **students**: Student records, including listing the students of a class
//! - **teachers**: Teacher records and their one-to-one class link
//! - **classes**: Class (section) records
//! - **shared**: Validation rule tables, list filters and integrity checks
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries implement the mediator pattern using the `mediator` crate.

pub mod classes;
pub mod shared;
pub mod students;
pub mod teachers;

use axum::Router;
use sqlx::PgPool;

/// Creates the API router with all feature routes mounted
///
/// - `/students` - Student management
/// - `/teachers` - Teacher management
/// - `/classes` - Class management
pub fn router(db: PgPool) -> Router<()> {
    Router::new()
        .nest("/students", students::students_routes().with_state(db.clone()))
        .nest("/teachers", teachers::teachers_routes().with_state(db.clone()))
        .nest("/classes", classes::classes_routes().with_state(db))
}
