//! Connection option resolver.
//!
//! Builds a backend-specific [`FullConnectionOptions`] from the settings store,
//! the instance home directory and the descriptor catalog. Nothing here opens
//! files or sockets; paths are only composed.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use common::config::{InstanceHome, SettingsProvider};
use common::errors::{AppError, AppResult};
use common::models::{BackendKind, MigrationDescriptor, NetworkFamily, ResourceFamily};
use tracing::debug;

use crate::catalog::DescriptorCatalog;
use crate::options::{
    CliPaths, CommonOptions, ConnectionDetail, FullConnectionOptions, NetworkCredentials,
};

const ENTITIES_DIR: &str = "entities";
const MIGRATIONS_DIR: &str = "migrations";

/// Settings keys read by the resolver.
pub mod keys {
    pub const DATABASE_TYPE: &str = "database.type";
    pub const TABLE_PREFIX: &str = "database.tablePrefix";
    pub const SQLITE_DATABASE: &str = "database.sqlite.database";
    pub const SQLITE_ENABLE_WAL: &str = "database.sqlite.enableWAL";
    pub const POSTGRES_SCHEMA: &str = "database.postgresdb.schema";
    pub const POSTGRES_POOL_SIZE: &str = "database.postgresdb.poolSize";
}

/// Installation root of this crate's database sources (entities, migrations).
pub fn default_install_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("databases")
}

/// Resolves backend selections into connection options.
///
/// Cheap to clone; holds only shared, read-only collaborators.
#[derive(Clone)]
pub struct ConnectionOptionsResolver {
    settings: Arc<dyn SettingsProvider>,
    instance_home: InstanceHome,
    install_root: PathBuf,
    catalog: Arc<DescriptorCatalog>,
}

impl std::fmt::Debug for ConnectionOptionsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionOptionsResolver")
            .field("instance_home", &self.instance_home)
            .field("install_root", &self.install_root)
            .finish_non_exhaustive()
    }
}

impl ConnectionOptionsResolver {
    /// Creates a resolver.
    ///
    /// `install_root` is made absolute against the current directory if needed.
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        instance_home: InstanceHome,
        install_root: impl AsRef<Path>,
        catalog: DescriptorCatalog,
    ) -> AppResult<Self> {
        let install_root = std::path::absolute(install_root.as_ref())
            .map_err(|e| AppError::InvalidPath(e.to_string()))?;
        Ok(Self {
            settings,
            instance_home,
            install_root,
            catalog: Arc::new(catalog),
        })
    }

    /// Creates a resolver rooted at [`default_install_root`].
    pub fn with_default_root(
        settings: Arc<dyn SettingsProvider>,
        instance_home: InstanceHome,
        catalog: DescriptorCatalog,
    ) -> AppResult<Self> {
        Self::new(settings, instance_home, default_install_root(), catalog)
    }

    /// Entity sources directory; identical for every backend.
    pub fn entities_dir(&self) -> PathBuf {
        self.install_root.join(ENTITIES_DIR)
    }

    /// Migrations directory of a resource family.
    pub fn migrations_dir(&self, family: ResourceFamily) -> PathBuf {
        self.install_root.join(MIGRATIONS_DIR).join(family.dir_name())
    }

    /// Builds the backend-agnostic options for `kind`.
    pub fn common_options(&self, kind: BackendKind) -> AppResult<CommonOptions> {
        let family = kind.family();
        let entity_prefix = self.settings.get_string(keys::TABLE_PREFIX)?;

        let connection = match family.network() {
            None => {
                let file_name = self.settings.get_string(keys::SQLITE_DATABASE)?;
                ConnectionDetail::Embedded {
                    database: embedded_database_path(self.instance_home.path(), &file_name),
                    enable_wal: self.settings.get_bool(keys::SQLITE_ENABLE_WAL)?,
                }
            }
            Some(network) => ConnectionDetail::Network(self.read_credentials(network)?),
        };

        let cli = CliPaths {
            entities_dir: self.entities_dir(),
            migrations_dir: self.migrations_dir(family),
        };
        debug!(
            backend = %kind,
            family = %family,
            migrations_dir = %cli.migrations_dir.display(),
            "resolved common connection options"
        );

        Ok(CommonOptions {
            migrations_table_name: CommonOptions::migrations_table_for(&entity_prefix),
            entity_prefix,
            entities: self.catalog.entities().to_vec(),
            cli,
            connection,
        })
    }

    /// SQLite connection options.
    pub fn sqlite_options(&self) -> AppResult<FullConnectionOptions> {
        self.assemble(BackendKind::Sqlite)
    }

    /// PostgreSQL connection options, including schema and pool size.
    pub fn postgres_options(&self) -> AppResult<FullConnectionOptions> {
        let mut options = self.assemble(BackendKind::Postgres)?;
        options.schema = Some(self.settings.get_string(keys::POSTGRES_SCHEMA)?);
        options.pool_size = Some(self.settings.get_u32(keys::POSTGRES_POOL_SIZE)?);
        Ok(options)
    }

    /// MySQL connection options.
    pub fn mysql_options(&self) -> AppResult<FullConnectionOptions> {
        self.assemble(BackendKind::MySql)
    }

    /// MariaDB connection options.
    ///
    /// Shares settings and migrations with MySQL; only the discriminator differs.
    pub fn mariadb_options(&self) -> AppResult<FullConnectionOptions> {
        self.assemble(BackendKind::MariaDb)
    }

    /// Dispatches to the entry point of `kind`.
    pub fn options_for(&self, kind: BackendKind) -> AppResult<FullConnectionOptions> {
        match kind {
            BackendKind::Sqlite => self.sqlite_options(),
            BackendKind::Postgres => self.postgres_options(),
            BackendKind::MySql => self.mysql_options(),
            BackendKind::MariaDb => self.mariadb_options(),
        }
    }

    /// Resolves options for the backend named by the `database.type` setting.
    pub fn configured_options(&self) -> AppResult<FullConnectionOptions> {
        let kind: BackendKind = self.settings.get_string(keys::DATABASE_TYPE)?.parse()?;
        self.options_for(kind)
    }

    /// Reads the five network credential fields of `family` fresh from settings.
    ///
    /// Used to patch an existing connection without rebuilding paths or entity lists.
    pub fn option_overrides(&self, family: NetworkFamily) -> AppResult<NetworkCredentials> {
        self.read_credentials(family)
    }

    fn read_credentials(&self, family: NetworkFamily) -> AppResult<NetworkCredentials> {
        Ok(NetworkCredentials {
            database: self.settings.get_string(&family.setting_key("database"))?,
            username: self.settings.get_string(&family.setting_key("user"))?,
            password: self.settings.get_string(&family.setting_key("password"))?,
            host: self.settings.get_string(&family.setting_key("host"))?,
            port: self.settings.get_u16(&family.setting_key("port"))?,
        })
    }

    /// Common options plus the family's migrations; backend extras are left unset.
    fn assemble(&self, kind: BackendKind) -> AppResult<FullConnectionOptions> {
        let common = self.common_options(kind)?;
        let migrations = self.catalog.migrations_for(kind.family()).to_vec();
        let latest_migration = migrations
            .iter()
            .filter_map(MigrationDescriptor::timestamp)
            .max();
        debug!(
            backend = %kind,
            migrations = migrations.len(),
            latest_migration = ?latest_migration,
            "resolved connection options"
        );
        Ok(FullConnectionOptions {
            backend: kind.tag(),
            common,
            schema: None,
            pool_size: None,
            migrations,
        })
    }
}

/// Places the configured file name under the instance home.
///
/// The name is appended even when it is itself absolute. `.` and `..` are
/// folded lexically, so `../db.sqlite` lands next to `home`.
fn embedded_database_path(home: &Path, file_name: &str) -> PathBuf {
    let joined = home.join(file_name.trim_start_matches(['/', '\\']));
    let mut path = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                path.pop();
            }
            other => path.push(other),
        }
    }
    path
}
