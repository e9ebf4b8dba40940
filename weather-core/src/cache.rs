use directories::ProjectDirs;
use std::{fmt::Debug, fs, path::PathBuf};

use crate::{
    config::APP_NAME,
    error::{Result, WeatherError},
};

/// Storage for the last payload that was fetched and rendered successfully.
pub trait PayloadCache: Send + Sync + Debug {
    fn read(&self) -> Result<String>;
    fn write(&self, payload: &str) -> Result<()>;
}

/// Single-file cache shared by every location and unit.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `cache.json` in the platform cache directory, which is created if
    /// it doesn't exist yet.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(WeatherError::CacheUnavailable)?;
        let dir = dirs.cache_dir();
        fs::create_dir_all(dir)?;

        Ok(Self::new(dir.join("cache.json")))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PayloadCache for FileCache {
    fn read(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Replaces the whole file in one write.
    fn write(&self, payload: &str) -> Result<()> {
        Ok(fs::write(&self.path, payload)?)
    }
}
