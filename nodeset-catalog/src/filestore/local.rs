// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Blobs as plain files under one root directory

use super::{is_valid_name, FileStorage, FileStorageKind};
use crate::error::CatalogResult;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const STAGING_SUFFIX: &str = ".partial";

#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(root: P) -> CatalogResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!("Initialized local file storage at {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        if is_valid_name(name) {
            Some(self.root.join(name))
        } else {
            warn!("Rejecting blob name '{}'", name);
            None
        }
    }
}

impl FileStorage for LocalFileStorage {
    fn find(&self, name: &str) -> Option<String> {
        let path = self.path_for(name)?;
        path.is_file().then(|| name.to_string())
    }

    fn upload(&self, name: &str, content: &[u8]) -> Option<String> {
        let path = self.path_for(name)?;
        // Write beside the target and rename so readers never see a partial blob
        let staging = self.root.join(format!("{}{}", name, STAGING_SUFFIX));
        let outcome = fs::write(&staging, content).and_then(|_| fs::rename(&staging, &path));
        match outcome {
            Ok(()) => {
                debug!("Stored {} ({} bytes)", name, content.len());
                Some(name.to_string())
            }
            Err(e) => {
                warn!("Failed to store {}: {}", name, e);
                let _ = fs::remove_file(&staging);
                None
            }
        }
    }

    fn download(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("Failed to read {}: {}", name, e);
                None
            }
        }
    }

    fn kind(&self) -> FileStorageKind {
        FileStorageKind::Local
    }
}
