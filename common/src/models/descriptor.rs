//! Entity and migration descriptors.
//!
//! Both are owned by the persistence layer; the resolver only forwards them.

use serde::{Deserialize, Serialize};

/// Definition of a persisted record type, identified by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EntityDescriptor {
    /// Entity name as known to the ORM.
    pub name: String,
}

impl EntityDescriptor {
    /// Creates a new entity descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One schema-evolution step, e.g. `InitialMigration1588102412422`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MigrationDescriptor {
    /// Migration name; by convention it ends with a millisecond timestamp.
    pub name: String,
}

impl MigrationDescriptor {
    /// Creates a new migration descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the trailing timestamp of the migration name, if present.
    pub fn timestamp(&self) -> Option<u64> {
        let digits = self
            .name
            .bytes()
            .rev()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        self.name[self.name.len() - digits..].parse().ok()
    }
}
