//! School Server Library
//!
//! REST backend for a small school registry: students, teachers and the
//! classes that group them.
//!
//! # Architecture
//!
//! The server follows a **CQRS** layout. Each entity is a feature slice with
//! commands (create, update, delete) and queries (get, list) that run
//! against PostgreSQL through SQLx.
//!
//! - **Validation**: Per-entity rule tables checked before any write
//! - **Integrity**: Class references are confirmed under a row lock inside
//!   the write transaction; uniqueness is backed by unique constraints
//! - **Filtering**: Optional list parameters become an AND-ed predicate
//!
//! Deleting a class does not cascade. Students and teachers keep the
//! dangling `classId`.
//!
//! ## Framework Stack
//!
//! - **Axum**: HTTP routing and extraction
//! - **SQLx**: Connection pool, migrations and runtime-checked queries
//! - **Tower**: Middleware and service abstractions
//!
//! # Example
//!
//! ```no_run
//! use school_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     let app = api::create_router(pool, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;

// Re-export commonly used types
pub use error::{AppError, AppResult};
