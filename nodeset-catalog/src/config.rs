// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog configuration
//!
//! Defaults, then an optional JSON file, then environment variables, then
//! whatever the caller sets explicitly.

use crate::error::{CatalogError, CatalogResult};
use crate::filestore::FileStorageKind;
use crate::storage::StorageType;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_STORAGE: &str = "NODESET_CATALOG_STORAGE";
pub const ENV_DB_PATH: &str = "NODESET_CATALOG_DB_PATH";
pub const ENV_FILES: &str = "NODESET_CATALOG_FILES";
pub const ENV_FILES_ROOT: &str = "NODESET_CATALOG_FILES_ROOT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Backend holding the attribute and type tables
    pub storage_type: StorageType,

    /// Database directory (ignored by the memory backend)
    pub db_path: PathBuf,

    /// Backend holding nodeset blobs
    pub file_storage: FileStorageKind,

    /// Blob directory for the local backend
    pub files_root: PathBuf,

    /// Page size from which aggregates are assembled in parallel
    pub parallel_threshold: usize,

    /// Limit used by the CLI when none is given
    pub default_limit: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::Sled,
            db_path: PathBuf::from("./nodeset-catalog.db"),
            file_storage: FileStorageKind::Local,
            files_root: PathBuf::from("./nodesets"),
            parallel_threshold: 64,
            default_limit: 10,
        }
    }
}

impl CatalogConfig {
    /// Everything in memory; nothing touches disk
    pub fn in_memory() -> Self {
        Self {
            storage_type: StorageType::Memory,
            file_storage: FileStorageKind::Memory,
            ..Self::default()
        }
    }

    /// Sled database and local blobs side by side under `dir`
    pub fn at_path<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            db_path: dir.join("catalog.db"),
            files_root: dir.join("nodesets"),
            ..Self::default()
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            CatalogError::ConfigError(format!("Invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `NODESET_CATALOG_*` variables that are set
    pub fn apply_env(mut self) -> CatalogResult<Self> {
        if let Ok(value) = std::env::var(ENV_STORAGE) {
            self.storage_type = value.parse().map_err(|e| {
                CatalogError::ConfigError(format!("{}: {}", ENV_STORAGE, e))
            })?;
        }
        if let Ok(value) = std::env::var(ENV_DB_PATH) {
            self.db_path = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var(ENV_FILES) {
            self.file_storage = value.parse()?;
        }
        if let Ok(value) = std::env::var(ENV_FILES_ROOT) {
            self.files_root = PathBuf::from(value);
        }
        debug!("Effective catalog configuration: {:?}", self);
        Ok(self)
    }

    /// File (if any) plus environment
    pub fn load(path: Option<&Path>) -> CatalogResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if self.parallel_threshold == 0 {
            return Err(CatalogError::ConfigError(
                "parallel_threshold must be at least 1".to_string(),
            ));
        }
        if self.default_limit < 0 {
            return Err(CatalogError::ConfigError(
                "default_limit must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for var in [ENV_STORAGE, ENV_DB_PATH, ENV_FILES, ENV_FILES_ROOT] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"storage_type": "memory", "parallel_threshold": 8}}"#).unwrap();

        let config = CatalogConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage_type, StorageType::Memory);
        assert_eq!(config.parallel_threshold, 8);
        assert_eq!(config.file_storage, FileStorageKind::Local);
        assert_eq!(config.default_limit, 10);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"parallel_threshold": 0}}"#).unwrap();
        assert!(matches!(
            CatalogConfig::from_file(file.path()),
            Err(CatalogError::ConfigError(_))
        ));
        assert!(CatalogConfig::from_file("/definitely/not/here.json").is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var(ENV_STORAGE, "memory");
        std::env::set_var(ENV_FILES, "memory");
        std::env::set_var(ENV_FILES_ROOT, "/tmp/blobs");

        let config = CatalogConfig::load(None).unwrap();
        assert_eq!(config.storage_type, StorageType::Memory);
        assert_eq!(config.file_storage, FileStorageKind::Memory);
        assert_eq!(config.files_root, PathBuf::from("/tmp/blobs"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_env_value_is_rejected() {
        clear_env();
        std::env::set_var(ENV_STORAGE, "postgres");
        assert!(CatalogConfig::load(None).is_err());
        clear_env();
    }
}
