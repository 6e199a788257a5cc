//! Platform stores
//!
//! Native builds keep a small JSON record on disk; the browser build uses
//! LocalStorage under the same key the game has always used.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use directories::ProjectDirs;
#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

use super::{BestScoreStore, PersistError};

/// LocalStorage key (also the JSON file stem on native)
pub const STORAGE_KEY: &str = "hiscore";

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecord {
    pub best: u32,
}

/// Best score kept in a JSON file, replaced atomically on write
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// `hiscore.json` in the platform's local data directory, if one resolves
    pub fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("com", "flappy-core", "Flappy Core")?;
        Some(dirs.data_local_dir().join(format!("{STORAGE_KEY}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BestScoreStore for JsonFileStore {
    fn read_best(&mut self) -> Result<u32, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<BestRecord>(&json) {
            Ok(record) => Ok(record.best),
            Err(e) => {
                // Unreadable record gets overwritten by the next best
                log::warn!("Ignoring malformed best score at {}: {}", self.path.display(), e);
                Ok(0)
            }
        }
    }

    fn write_best(&mut self, score: u32) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(&BestRecord { best: score })?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// Best score in browser LocalStorage, stored as a plain integer string
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .ok_or_else(|| PersistError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|_| PersistError::Unavailable("localStorage access denied".to_string()))?
            .ok_or_else(|| PersistError::Unavailable("localStorage missing".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn read_best(&mut self) -> Result<u32, PersistError> {
        let value = Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|_| PersistError::Unavailable("localStorage read failed".to_string()))?;
        Ok(value.and_then(|v| v.trim().parse().ok()).unwrap_or(0))
    }

    fn write_best(&mut self, score: u32) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(STORAGE_KEY, &score.to_string())
            .map_err(|_| PersistError::Rejected("localStorage quota or policy".to_string()))?;
        log::info!("Best score {} saved", score);
        Ok(())
    }
}
