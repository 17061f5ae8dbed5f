//! Goaltrack Core - the validated financial goal store.
//!
//! This crate contains the goal domain: models, validation rules, the
//! `GoalService` store, and the ports it talks to. It is storage-agnostic and
//! defines traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod notifications;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
