//! Environment-backed settings.
//!
//! Every known key maps to one environment variable and a default. Variables
//! are captured once at load time; a `.env` file may supply values the process
//! environment does not set.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use super::provider::SettingsProvider;
use crate::errors::{AppError, AppResult};

/// Value shape of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    String,
    Bool,
    Port,
    Integer,
}

/// Schema entry for one setting.
#[derive(Debug, Clone, Copy)]
pub struct SettingSpec {
    /// Dotted settings key.
    pub key: &'static str,
    /// Environment variable that overrides the default.
    pub env: &'static str,
    pub kind: SettingKind,
    /// Default, written the way it would appear in the environment.
    pub default: &'static str,
}

const fn spec(
    key: &'static str,
    env: &'static str,
    kind: SettingKind,
    default: &'static str,
) -> SettingSpec {
    SettingSpec {
        key,
        env,
        kind,
        default,
    }
}

/// Database settings schema.
pub const DATABASE_SETTINGS: &[SettingSpec] = &[
    spec("database.type", "DB_TYPE", SettingKind::String, "sqlite"),
    spec("database.tablePrefix", "DB_TABLE_PREFIX", SettingKind::String, ""),
    // sqlite
    spec(
        "database.sqlite.database",
        "DB_SQLITE_DATABASE",
        SettingKind::String,
        "database.sqlite",
    ),
    spec(
        "database.sqlite.enableWAL",
        "DB_SQLITE_ENABLE_WAL",
        SettingKind::Bool,
        "false",
    ),
    // postgresdb
    spec(
        "database.postgresdb.database",
        "DB_POSTGRESDB_DATABASE",
        SettingKind::String,
        "n8n",
    ),
    spec(
        "database.postgresdb.host",
        "DB_POSTGRESDB_HOST",
        SettingKind::String,
        "localhost",
    ),
    spec(
        "database.postgresdb.port",
        "DB_POSTGRESDB_PORT",
        SettingKind::Port,
        "5432",
    ),
    spec(
        "database.postgresdb.user",
        "DB_POSTGRESDB_USER",
        SettingKind::String,
        "postgres",
    ),
    spec(
        "database.postgresdb.password",
        "DB_POSTGRESDB_PASSWORD",
        SettingKind::String,
        "",
    ),
    spec(
        "database.postgresdb.schema",
        "DB_POSTGRESDB_SCHEMA",
        SettingKind::String,
        "public",
    ),
    spec(
        "database.postgresdb.poolSize",
        "DB_POSTGRESDB_POOL_SIZE",
        SettingKind::Integer,
        "2",
    ),
    // mysqldb
    spec(
        "database.mysqldb.database",
        "DB_MYSQLDB_DATABASE",
        SettingKind::String,
        "n8n",
    ),
    spec(
        "database.mysqldb.host",
        "DB_MYSQLDB_HOST",
        SettingKind::String,
        "localhost",
    ),
    spec(
        "database.mysqldb.port",
        "DB_MYSQLDB_PORT",
        SettingKind::Port,
        "3306",
    ),
    spec(
        "database.mysqldb.user",
        "DB_MYSQLDB_USER",
        SettingKind::String,
        "root",
    ),
    spec(
        "database.mysqldb.password",
        "DB_MYSQLDB_PASSWORD",
        SettingKind::String,
        "",
    ),
];

/// Looks up the schema entry for `key`.
pub fn setting_spec(key: &str) -> Option<&'static SettingSpec> {
    DATABASE_SETTINGS.iter().find(|spec| spec.key == key)
}

/// Settings resolved from captured environment variables with schema defaults.
///
/// Unknown keys yield [`AppError::MissingSetting`]; known keys never do, since
/// each has a default. Malformed values yield [`AppError::InvalidSetting`].
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    vars: HashMap<String, String>,
}

impl EnvSettings {
    /// Captures the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Captures the process environment, filling gaps from a `.env` file.
    ///
    /// A missing file is not an error.
    pub fn load(dotenv_path: &Path) -> AppResult<Self> {
        let mut settings = Self::from_env();
        if !dotenv_path.exists() {
            debug!(path = ?dotenv_path, ".env file not found, using process environment");
            return Ok(settings);
        }
        let content = std::fs::read_to_string(dotenv_path)
            .map_err(|e| AppError::InvalidPath(format!("{}: {}", dotenv_path.display(), e)))?;
        settings.merge_dotenv(&content);
        debug!(path = ?dotenv_path, "loaded .env file");
        Ok(settings)
    }

    /// Adds `.env` content for variables not already captured.
    pub fn merge_dotenv(&mut self, content: &str) {
        for (key, value) in parse_dotenv(content) {
            // Only set if not already set by the environment
            self.vars.entry(key).or_insert(value);
        }
    }

    /// Builds settings from an explicit variable list.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SettingsProvider for EnvSettings {
    fn get(&self, key: &str) -> AppResult<Value> {
        let spec = setting_spec(key).ok_or_else(|| AppError::MissingSetting(key.to_string()))?;
        let raw = self
            .vars
            .get(spec.env)
            .map(String::as_str)
            .unwrap_or(spec.default);
        parse_setting(spec, raw)
    }
}

/// Converts a raw environment string into a typed value per the schema entry.
pub fn parse_setting(spec: &SettingSpec, raw: &str) -> AppResult<Value> {
    let invalid =
        |expected: &'static str| AppError::invalid_setting(spec.key, expected, &Value::from(raw));
    match spec.kind {
        SettingKind::String => Ok(Value::String(raw.to_string())),
        SettingKind::Bool => parse_bool(raw).map(Value::Bool).ok_or_else(|| invalid("boolean")),
        SettingKind::Port => raw
            .trim()
            .parse::<u16>()
            .map(Value::from)
            .map_err(|_| invalid("port number")),
        SettingKind::Integer => raw
            .trim()
            .parse::<u32>()
            .map(Value::from)
            .map_err(|_| invalid("unsigned integer")),
    }
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses `.env` content into key/value pairs.
///
/// Blank lines and `#` comments are skipped; surrounding quotes on values are removed.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        match line.split_once('=') {
            Some((key, value)) => {
                pairs.push((key.trim().to_string(), unquote(value.trim()).to_string()));
            }
            None => warn!(line = index + 1, "ignoring malformed .env line"),
        }
    }
    pairs
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let settings = EnvSettings::from_vars(Vec::<(String, String)>::new());
        assert_eq!(settings.get_string("database.type").unwrap(), "sqlite");
        assert_eq!(settings.get_string("database.tablePrefix").unwrap(), "");
        assert!(!settings.get_bool("database.sqlite.enableWAL").unwrap());
        assert_eq!(settings.get_u16("database.postgresdb.port").unwrap(), 5432);
        assert_eq!(settings.get_u16("database.mysqldb.port").unwrap(), 3306);
        assert_eq!(settings.get_u32("database.postgresdb.poolSize").unwrap(), 2);
        assert_eq!(settings.get_string("database.mysqldb.user").unwrap(), "root");
    }

    #[test]
    fn test_env_overrides_default() {
        let settings = EnvSettings::from_vars([
            ("DB_TABLE_PREFIX", "wf_"),
            ("DB_SQLITE_ENABLE_WAL", "TRUE"),
            ("DB_POSTGRESDB_POOL_SIZE", "10"),
        ]);
        assert_eq!(settings.get_string("database.tablePrefix").unwrap(), "wf_");
        assert!(settings.get_bool("database.sqlite.enableWAL").unwrap());
        assert_eq!(settings.get_u32("database.postgresdb.poolSize").unwrap(), 10);
    }

    #[test]
    fn test_malformed_env_is_invalid_setting() {
        let settings = EnvSettings::from_vars([("DB_MYSQLDB_PORT", "not-a-port")]);
        assert!(matches!(
            settings.get("database.mysqldb.port"),
            Err(AppError::InvalidSetting { expected: "port number", .. })
        ));
    }

    #[test]
    fn test_unknown_key_is_missing() {
        let settings = EnvSettings::default();
        assert_eq!(
            settings.get("database.oracle.host"),
            Err(AppError::MissingSetting("database.oracle.host".into()))
        );
    }

    #[test]
    fn test_every_default_parses() {
        for spec in DATABASE_SETTINGS {
            assert!(parse_setting(spec, spec.default).is_ok(), "{}", spec.key);
        }
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_dotenv() {
        let pairs = parse_dotenv(
            "# comment\n\nDB_TYPE=postgresdb\nexport DB_POSTGRESDB_PASSWORD=\"s3cr=t\"\nbroken\n",
        );
        assert_eq!(
            pairs,
            vec![
                ("DB_TYPE".to_string(), "postgresdb".to_string()),
                ("DB_POSTGRESDB_PASSWORD".to_string(), "s3cr=t".to_string()),
            ]
        );
    }

    #[test]
    fn test_process_env_wins_over_dotenv() {
        let mut settings = EnvSettings::from_vars([("DB_POSTGRESDB_HOST", "from-process")]);
        settings.merge_dotenv("DB_POSTGRESDB_HOST=from-file\nDB_POSTGRESDB_USER=n8n_user\n");
        assert_eq!(
            settings.get_string("database.postgresdb.host").unwrap(),
            "from-process"
        );
        assert_eq!(
            settings.get_string("database.postgresdb.user").unwrap(),
            "n8n_user"
        );
        assert_eq!(
            settings.get_string("database.postgresdb.database").unwrap(),
            "n8n"
        );
    }

    #[test]
    fn test_load_missing_dotenv_is_ok() {
        let path = Path::new("/nonexistent/dir/.env");
        assert!(EnvSettings::load(path).is_ok());
    }
}
