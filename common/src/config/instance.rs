//! Instance home directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};

/// Environment variable that relocates the user folder.
pub const USER_FOLDER_ENV: &str = "N8N_USER_FOLDER";

/// Directory created inside the user folder for instance data.
pub const INSTANCE_DIR_NAME: &str = ".n8n";

/// Absolute directory holding the instance's local data, such as the SQLite file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceHome(PathBuf);

impl InstanceHome {
    /// Wraps an absolute directory path.
    pub fn new(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(AppError::InvalidPath(format!(
                "instance home must be absolute: {}",
                path.display()
            )));
        }
        Ok(Self(path))
    }

    /// Resolves `<user folder>/.n8n`, where the user folder is `N8N_USER_FOLDER`
    /// or the current user's home directory.
    pub fn from_env() -> AppResult<Self> {
        let user_folder = select_user_folder(std::env::var_os(USER_FOLDER_ENV), dirs::home_dir)
            .ok_or_else(|| AppError::InvalidPath("cannot determine user home directory".into()))?;
        Self::in_user_folder(user_folder)
    }

    /// Resolves the instance directory inside `user_folder`.
    pub fn in_user_folder(user_folder: impl AsRef<Path>) -> AppResult<Self> {
        let user_folder = std::path::absolute(user_folder.as_ref())
            .map_err(|e| AppError::InvalidPath(e.to_string()))?;
        Self::new(user_folder.join(INSTANCE_DIR_NAME))
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Picks the user folder: a non-empty override, otherwise the home directory.
pub fn select_user_folder(
    override_folder: Option<OsString>,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    override_folder
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(home_dir)
}

impl AsRef<Path> for InstanceHome {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_home_is_rejected() {
        assert!(matches!(
            InstanceHome::new("data/n8n"),
            Err(AppError::InvalidPath(_))
        ));
    }

    fn home() -> Option<PathBuf> {
        Some(PathBuf::from("/home/node"))
    }

    #[test]
    fn test_user_folder_override() {
        let folder = select_user_folder(Some(OsString::from("/srv/n8n")), home);
        assert_eq!(folder, Some(PathBuf::from("/srv/n8n")));
    }

    #[test]
    fn test_empty_override_falls_back_to_home() {
        let folder = select_user_folder(Some(OsString::new()), home);
        assert_eq!(folder, Some(PathBuf::from("/home/node")));
    }

    #[test]
    fn test_unset_override_uses_home() {
        assert_eq!(select_user_folder(None, home), Some(PathBuf::from("/home/node")));
        assert_eq!(select_user_folder(None, || None), None);
    }

    #[test]
    fn test_in_user_folder() {
        let home = InstanceHome::in_user_folder("/home/node").unwrap();
        assert_eq!(home.path(), Path::new("/home/node/.n8n"));
    }
}
