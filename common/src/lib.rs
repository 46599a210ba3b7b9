//! Shared building blocks for database connection options.
//!
//! - [`models`]: backend identifiers and externally owned descriptors
//! - [`config`]: settings providers and the instance home directory
//! - [`errors`]: the workspace error type

pub mod config;
pub mod errors;
pub mod models;

pub use errors::{AppError, AppResult};
