use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "DeviceBuyback";
const APP_NAME: &str = "DeviceBuyback";

pub const PENDING_FORM_KEY: &str = "pendingSellForm";
pub const PENDING_STEP_KEY: &str = "pendingSellStep";
pub const PENDING_IMAGES_KEY: &str = "pendingSellImages";
pub const OFFLINE_SUBMISSIONS_KEY: &str = "sellSubmissions";
pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Durable string-keyed JSON storage. Each key is one `<key>.json` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Store rooted in the per-user config directory.
    pub fn open_default() -> Result<Self, PersistSaveError> {
        let root = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("device-buyback")))
            .ok_or(PersistSaveError::StorageUnavailable)?;
        Ok(Self::at(root))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Reads a value; missing or unreadable entries come back as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("[store] failed to read {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("[store] failed to parse {}: {err}", path.display());
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), PersistSaveError> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), json)?;
        debug!("[store] wrote {key}");
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), PersistSaveError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::at(dir.path().join("nested"));

        assert_eq!(store.get::<u8>(PENDING_STEP_KEY), None);
        store.set(PENDING_STEP_KEY, &4u8).expect("write step");
        assert!(store.contains(PENDING_STEP_KEY));
        assert_eq!(store.get::<u8>(PENDING_STEP_KEY), Some(4));

        store.remove(PENDING_STEP_KEY).expect("remove step");
        assert!(!store.contains(PENDING_STEP_KEY));
        store.remove(PENDING_STEP_KEY).expect("removing twice is fine");
    }

    #[test]
    fn corrupt_entry_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::at(dir.path());
        fs::write(dir.path().join("authToken.json"), "{not json").expect("write garbage");
        assert_eq!(store.get::<String>(AUTH_TOKEN_KEY), None);
    }
}
