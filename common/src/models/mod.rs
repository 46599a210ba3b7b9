//! Shared data models.

pub mod connection;
pub mod descriptor;

// Re-export commonly used types
pub use connection::{BackendKind, BackendTag, NetworkFamily, ResourceFamily};
pub use descriptor::{EntityDescriptor, MigrationDescriptor};
