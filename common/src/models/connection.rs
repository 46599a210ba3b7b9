//! Backend identifier models.
//!
//! Maps the four supported relational engines onto the resource family whose
//! settings scope and migrations they share.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Database backend selected for a resolution call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Embedded SQLite file database.
    #[serde(rename = "sqlite")]
    Sqlite,
    /// PostgreSQL database.
    #[serde(rename = "postgresdb")]
    Postgres,
    /// MySQL database.
    #[serde(rename = "mysqldb")]
    MySql,
    /// MariaDB database.
    #[serde(rename = "mariadb")]
    MariaDb,
}

impl BackendKind {
    /// All supported backends.
    pub const ALL: [BackendKind; 4] = [
        BackendKind::Sqlite,
        BackendKind::Postgres,
        BackendKind::MySql,
        BackendKind::MariaDb,
    ];

    /// Returns the configuration identifier of this backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::Postgres => "postgresdb",
            BackendKind::MySql => "mysqldb",
            BackendKind::MariaDb => "mariadb",
        }
    }

    /// Returns the resource family whose settings and migrations this backend uses.
    ///
    /// Both MySQL-family backends collapse onto [`ResourceFamily::MySql`].
    pub fn family(&self) -> ResourceFamily {
        match self {
            BackendKind::Sqlite => ResourceFamily::Sqlite,
            BackendKind::Postgres => ResourceFamily::Postgres,
            BackendKind::MySql | BackendKind::MariaDb => ResourceFamily::MySql,
        }
    }

    /// Returns the discriminator handed to the driver.
    pub fn tag(&self) -> BackendTag {
        match self {
            BackendKind::Sqlite => BackendTag::Sqlite,
            BackendKind::Postgres => BackendTag::Postgres,
            BackendKind::MySql => BackendTag::Mysql,
            BackendKind::MariaDb => BackendTag::Mariadb,
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(BackendKind::Sqlite),
            "postgresdb" => Ok(BackendKind::Postgres),
            "mysqldb" => Ok(BackendKind::MySql),
            "mariadb" => Ok(BackendKind::MariaDb),
            _ => Err(AppError::UnsupportedBackend(s.to_string())),
        }
    }
}

/// Shared resource group: settings scope and migrations subdirectory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceFamily {
    #[serde(rename = "sqlite")]
    Sqlite,
    #[serde(rename = "postgresdb")]
    Postgres,
    #[serde(rename = "mysqldb")]
    MySql,
}

impl ResourceFamily {
    /// Name used both as settings scope (`database.<name>.*`) and migrations subdirectory.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ResourceFamily::Sqlite => "sqlite",
            ResourceFamily::Postgres => "postgresdb",
            ResourceFamily::MySql => "mysqldb",
        }
    }

    /// Returns the network family, or `None` for the embedded backend.
    pub fn network(&self) -> Option<NetworkFamily> {
        match self {
            ResourceFamily::Sqlite => None,
            ResourceFamily::Postgres => Some(NetworkFamily::Postgres),
            ResourceFamily::MySql => Some(NetworkFamily::MySql),
        }
    }
}

impl std::fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Resource families reached over the network.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NetworkFamily {
    #[serde(rename = "postgresdb")]
    Postgres,
    #[serde(rename = "mysqldb")]
    MySql,
}

impl NetworkFamily {
    /// Settings scope of this family.
    pub fn dir_name(&self) -> &'static str {
        ResourceFamily::from(*self).dir_name()
    }

    /// Builds the settings key `database.<family>.<field>`.
    pub fn setting_key(&self, field: &str) -> String {
        format!("database.{}.{}", self.dir_name(), field)
    }
}

impl From<NetworkFamily> for ResourceFamily {
    fn from(family: NetworkFamily) -> Self {
        match family {
            NetworkFamily::Postgres => ResourceFamily::Postgres,
            NetworkFamily::MySql => ResourceFamily::MySql,
        }
    }
}

impl FromStr for NetworkFamily {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<BackendKind>()? {
            BackendKind::Postgres => Ok(NetworkFamily::Postgres),
            BackendKind::MySql => Ok(NetworkFamily::MySql),
            _ => Err(AppError::UnsupportedBackend(s.to_string())),
        }
    }
}

/// Discriminator written into the final option record as `type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BackendTag {
    Sqlite,
    Postgres,
    Mysql,
    Mariadb,
}

impl BackendTag {
    /// Returns the discriminator string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendTag::Sqlite => "sqlite",
            BackendTag::Postgres => "postgres",
            BackendTag::Mysql => "mysql",
            BackendTag::Mariadb => "mariadb",
        }
    }

    /// Backend this discriminator belongs to.
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendTag::Sqlite => BackendKind::Sqlite,
            BackendTag::Postgres => BackendKind::Postgres,
            BackendTag::Mysql => BackendKind::MySql,
            BackendTag::Mariadb => BackendKind::MariaDb,
        }
    }
}

impl std::fmt::Display for BackendTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
