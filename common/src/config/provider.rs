//! Settings lookup abstraction.
//!
//! Settings are addressed by dotted keys such as `database.postgresdb.host`.
//! What happens on a missing key is decided by each provider.

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Read-only settings store.
pub trait SettingsProvider: Send + Sync {
    /// Returns the raw value stored under `key`.
    fn get(&self, key: &str) -> AppResult<Value>;

    /// Returns the value under `key` as a string.
    fn get_string(&self, key: &str) -> AppResult<String> {
        match self.get(key)? {
            Value::String(s) => Ok(s),
            other => Err(AppError::invalid_setting(key, "string", &other)),
        }
    }

    /// Returns the value under `key` as a boolean.
    fn get_bool(&self, key: &str) -> AppResult<bool> {
        match self.get(key)? {
            Value::Bool(b) => Ok(b),
            other => Err(AppError::invalid_setting(key, "boolean", &other)),
        }
    }

    /// Returns the value under `key` as a port number.
    fn get_u16(&self, key: &str) -> AppResult<u16> {
        let value = self.get(key)?;
        value
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| AppError::invalid_setting(key, "port number", &value))
    }

    /// Returns the value under `key` as an unsigned 32-bit integer.
    fn get_u32(&self, key: &str) -> AppResult<u32> {
        let value = self.get(key)?;
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| AppError::invalid_setting(key, "unsigned integer", &value))
    }
}

/// In-memory settings store.
///
/// Unknown keys yield [`AppError::MissingSetting`]; no defaults are substituted.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, Value>,
}

impl MemorySettings {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a nested JSON document, flattening objects into dotted keys.
    ///
    /// `{"database": {"tablePrefix": "wf_"}}` becomes `database.tablePrefix = "wf_"`.
    pub fn from_json(document: &Value) -> Self {
        let mut settings = Self::new();
        flatten_into(&mut settings.values, String::new(), document);
        settings
    }

    /// Sets `key` and returns the store, for chained construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsProvider for MemorySettings {
    fn get(&self, key: &str) -> AppResult<Value> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::MissingSetting(key.to_string()))
    }
}

fn flatten_into(out: &mut HashMap<String, Value>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(out, path, child);
            }
        }
        // Empty prefix means a non-object document root; nothing to key it by.
        _ if prefix.is_empty() => {}
        other => {
            out.insert(prefix, other.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_is_an_error() {
        let settings = MemorySettings::new();
        assert_eq!(
            settings.get("database.tablePrefix"),
            Err(AppError::MissingSetting("database.tablePrefix".into()))
        );
    }

    #[test]
    fn test_typed_getters() {
        let settings = MemorySettings::new()
            .with("a.str", "x")
            .with("a.bool", true)
            .with("a.port", 5432)
            .with("a.size", 10);
        assert_eq!(settings.get_string("a.str").unwrap(), "x");
        assert!(settings.get_bool("a.bool").unwrap());
        assert_eq!(settings.get_u16("a.port").unwrap(), 5432);
        assert_eq!(settings.get_u32("a.size").unwrap(), 10);
    }

    #[test]
    fn test_type_mismatch() {
        let settings = MemorySettings::new()
            .with("a.port", 70000)
            .with("a.bool", "yes");
        assert!(matches!(
            settings.get_u16("a.port"),
            Err(AppError::InvalidSetting { expected: "port number", .. })
        ));
        assert!(matches!(
            settings.get_bool("a.bool"),
            Err(AppError::InvalidSetting { expected: "boolean", .. })
        ));
    }

    #[test]
    fn test_from_json_flattens_objects() {
        let settings = MemorySettings::from_json(&json!({
            "database": {
                "tablePrefix": "wf_",
                "postgresdb": { "port": 5433 }
            }
        }));
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.get_string("database.tablePrefix").unwrap(), "wf_");
        assert_eq!(settings.get_u16("database.postgresdb.port").unwrap(), 5433);
    }
}
