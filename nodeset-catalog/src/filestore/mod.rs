// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Blob storage for nodeset files
//!
//! The catalog only ever talks to [`FileStorage`]; which backend sits behind
//! it is decided once, from configuration, by [`create_file_storage`].
//! Implementations swallow their own failures: every operation answers
//! `None` rather than an error.

pub mod local;
pub mod memory;

pub use local::LocalFileStorage;
pub use memory::MemoryFileStorage;

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suffix of every stored nodeset blob
pub const NODESET_FILE_SUFFIX: &str = ".nodeset2.xml";

/// Conventional blob name for a nodeset identifier
pub fn nodeset_file_name(id: crate::storage::NodesetId) -> String {
    format!("{}{}", id, NODESET_FILE_SUFFIX)
}

pub trait FileStorage: Send + Sync {
    /// Stored name of `name`, if present
    fn find(&self, name: &str) -> Option<String>;

    /// Store `content` under `name`, replacing any previous blob
    fn upload(&self, name: &str, content: &[u8]) -> Option<String>;

    fn download(&self, name: &str) -> Option<Vec<u8>>;

    fn kind(&self) -> FileStorageKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStorageKind {
    #[default]
    Local,
    Memory,
}

impl std::str::FromStr for FileStorageKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "disk" => Ok(FileStorageKind::Local),
            "memory" | "mem" => Ok(FileStorageKind::Memory),
            other => Err(CatalogError::ConfigError(format!(
                "Unknown file storage backend: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for FileStorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageKind::Local => write!(f, "local"),
            FileStorageKind::Memory => write!(f, "memory"),
        }
    }
}

/// Build the configured backend
pub fn create_file_storage<P: AsRef<Path>>(
    kind: FileStorageKind,
    root: P,
) -> CatalogResult<Box<dyn FileStorage>> {
    match kind {
        FileStorageKind::Local => Ok(Box::new(LocalFileStorage::new(root)?)),
        FileStorageKind::Memory => Ok(Box::new(MemoryFileStorage::new())),
    }
}

/// Blob names are flat: no separators, no parent references
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| c == '/' || c == '\\')
        && !name.contains('\0')
}
