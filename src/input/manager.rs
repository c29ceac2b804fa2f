//! Record loader for profile and job files

use crate::error::{MatcherError, Result};
use crate::input::file_detector::RecordFormat;
use crate::input::records::{Job, Profile};
use log::info;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct RecordLoader {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn load_profile(&mut self, path: &Path) -> Result<Profile> {
        self.load(path).await
    }

    pub async fn load_job(&mut self, path: &Path) -> Result<Job> {
        self.load(path).await
    }

    /// Read and deserialize a record, picking the parser from the extension
    pub async fn load<T: DeserializeOwned>(&mut self, path: &Path) -> Result<T> {
        let format = self.detect_format(path)?;
        if format == RecordFormat::Unknown {
            return Err(MatcherError::UnsupportedFormat(format!(
                "Unsupported record file: {}",
                path.display()
            )));
        }

        let content = self.read_source(path).await?;

        match format {
            RecordFormat::Json => Ok(serde_json::from_str(&content)?),
            _ => Ok(toml::from_str(&content)?),
        }
    }

    async fn read_source(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached record for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        info!("Reading record file: {}", path.display());
        let content = fs::read_to_string(path).await?;

        if self.enable_cache {
            self.cache.insert(path_str, content.clone());
        }

        Ok(content)
    }

    fn detect_format(&self, path: &Path) -> Result<RecordFormat> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                MatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(RecordFormat::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
