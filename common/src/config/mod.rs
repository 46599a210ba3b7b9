//! Settings providers and the instance home directory.

pub mod env;
pub mod instance;
pub mod provider;

pub use env::{EnvSettings, SettingKind, SettingSpec, DATABASE_SETTINGS};
pub use instance::InstanceHome;
pub use provider::{MemorySettings, SettingsProvider};
