//! SQLite storage implementation for Goaltrack.
//!
//! This crate provides the persistence side of the goal store using Diesel ORM
//! with SQLite. It models browser-style local storage as a table of named
//! slots and contains:
//! - Database connection pooling, migrations and the single-writer actor
//! - The `local_storage` slot repository
//! - The goal repository implementing `GoalRepositoryTrait`
//! - `open_goal_store`, which assembles a ready `GoalService`
//!
//! ```text
//!   core (GoalService)
//!          │  GoalRepositoryTrait
//!          ▼
//!   storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod config;
pub mod db;
pub mod errors;
pub mod goals;
pub mod local_storage;
pub mod schema;
pub mod store;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

pub use config::StorageConfig;
pub use errors::{IntoCore, StorageError};
pub use store::open_goal_store;

// Re-export from goaltrack-core for convenience
pub use goaltrack_core::errors::{DatabaseError, Error, Result};
