//! Database connection options.
//!
//! Resolves one of the supported backends (`sqlite`, `postgresdb`, `mysqldb`,
//! `mariadb`) into the option record the ORM driver consumes:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use common::config::{EnvSettings, InstanceHome};
//! use connection_options::{ConnectionOptionsResolver, DescriptorCatalog};
//!
//! # fn main() -> common::AppResult<()> {
//! let resolver = ConnectionOptionsResolver::with_default_root(
//!     Arc::new(EnvSettings::from_env()),
//!     InstanceHome::from_env()?,
//!     DescriptorCatalog::default(),
//! )?;
//! let options = resolver.configured_options()?;
//! println!("{}", options.redacted_url());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod driver;
pub mod options;
pub mod resolver;

pub use catalog::DescriptorCatalog;
pub use driver::DriverOptions;
pub use options::{
    CliPaths, CommonOptions, ConnectionDetail, FullConnectionOptions, NetworkCredentials,
};
pub use resolver::{default_install_root, ConnectionOptionsResolver};
