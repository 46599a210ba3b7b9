//! Connection option records handed to the persistence layer.
//!
//! Records serialize in the camelCase shape the ORM driver reads, with the
//! connection detail flattened into the top level and the backend
//! discriminator emitted as `type`.

use std::path::{Path, PathBuf};

use common::errors::{AppError, AppResult};
use common::models::{BackendKind, BackendTag, EntityDescriptor, MigrationDescriptor};
use serde::{Deserialize, Serialize};

/// Suffix appended to the entity prefix to name the migrations table.
pub const MIGRATIONS_TABLE_SUFFIX: &str = "migrations";

/// Absolute source directories used by the ORM tooling.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliPaths {
    pub entities_dir: PathBuf,
    pub migrations_dir: PathBuf,
}

/// Credentials and address of a network database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkCredentials {
    pub database: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

/// Backend connection particulars; exactly one shape per backend.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConnectionDetail {
    /// SQLite database file.
    Embedded {
        database: PathBuf,
        #[serde(rename = "enableWAL")]
        enable_wal: bool,
    },
    /// Network database server.
    Network(NetworkCredentials),
}

/// Backend-agnostic part of the connection options.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommonOptions {
    pub entity_prefix: String,
    pub entities: Vec<EntityDescriptor>,
    /// Always `{entity_prefix}migrations`.
    pub migrations_table_name: String,
    pub cli: CliPaths,
    #[serde(flatten)]
    pub connection: ConnectionDetail,
}

impl CommonOptions {
    /// Derives the migrations table name from an entity prefix.
    pub fn migrations_table_for(entity_prefix: &str) -> String {
        format!("{}{}", entity_prefix, MIGRATIONS_TABLE_SUFFIX)
    }
}

/// Final options record consumed by the connection manager.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FullConnectionOptions {
    /// Backend discriminator.
    #[serde(rename = "type")]
    pub backend: BackendTag,
    #[serde(flatten)]
    pub common: CommonOptions,
    /// Search path schema (PostgreSQL only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Connection pool size (PostgreSQL only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    pub migrations: Vec<MigrationDescriptor>,
}

impl FullConnectionOptions {
    /// Backend these options were resolved for.
    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Network credentials, if this is a network backend.
    pub fn credentials(&self) -> Option<&NetworkCredentials> {
        match &self.common.connection {
            ConnectionDetail::Network(credentials) => Some(credentials),
            ConnectionDetail::Embedded { .. } => None,
        }
    }

    /// Database file path, if this is the embedded backend.
    pub fn database_file(&self) -> Option<&Path> {
        match &self.common.connection {
            ConnectionDetail::Embedded { database, .. } => Some(database),
            ConnectionDetail::Network(_) => None,
        }
    }

    /// Migrations source directory.
    pub fn migrations_dir(&self) -> &Path {
        &self.common.cli.migrations_dir
    }

    /// Checks that the discriminator and the connection detail shape agree.
    pub fn ensure_consistent(&self) -> AppResult<()> {
        let embedded = matches!(self.common.connection, ConnectionDetail::Embedded { .. });
        if embedded == (self.kind() == BackendKind::Sqlite) {
            Ok(())
        } else {
            Err(AppError::BackendMismatch(self.backend.to_string()))
        }
    }

    /// Replaces the network credentials in place, e.g. with the result of
    /// [`option_overrides`](crate::ConnectionOptionsResolver::option_overrides).
    pub fn apply_overrides(&mut self, overrides: NetworkCredentials) -> AppResult<()> {
        match &mut self.common.connection {
            ConnectionDetail::Network(credentials) => {
                *credentials = overrides;
                Ok(())
            }
            ConnectionDetail::Embedded { .. } => {
                Err(AppError::BackendMismatch(self.backend.to_string()))
            }
        }
    }
}
