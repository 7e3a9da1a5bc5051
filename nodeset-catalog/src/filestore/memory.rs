// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory blob storage for tests and throwaway catalogs

use super::{is_valid_name, FileStorage, FileStorageKind};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct MemoryFileStorage {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl FileStorage for MemoryFileStorage {
    fn find(&self, name: &str) -> Option<String> {
        self.blobs
            .read()
            .contains_key(name)
            .then(|| name.to_string())
    }

    fn upload(&self, name: &str, content: &[u8]) -> Option<String> {
        if !is_valid_name(name) {
            return None;
        }
        self.blobs.write().insert(name.to_string(), content.to_vec());
        Some(name.to_string())
    }

    fn download(&self, name: &str) -> Option<Vec<u8>> {
        self.blobs.read().get(name).cloned()
    }

    fn kind(&self) -> FileStorageKind {
        FileStorageKind::Memory
    }
}
