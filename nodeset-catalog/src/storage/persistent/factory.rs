// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver factory

use super::traits::{DynStorageDriver, StorageDriver};
use super::types::{StorageResult, StorageType};
use std::path::Path;

/// Create a storage driver of the requested type rooted at `path`
///
/// The memory driver ignores `path`.
pub fn create_storage_driver<P: AsRef<Path>>(
    storage_type: StorageType,
    path: P,
) -> StorageResult<DynStorageDriver> {
    match storage_type {
        #[cfg(feature = "sled-backend")]
        StorageType::Sled => {
            use crate::storage::persistent::sled::SledDriver;
            let driver = SledDriver::open(path)?;
            Ok(Box::new(driver) as DynStorageDriver)
        }
        #[cfg(not(feature = "sled-backend"))]
        StorageType::Sled => Err(super::types::StorageDriverError::BackendSpecific(
            "sled backend not compiled in; enable the `sled-backend` feature".to_string(),
        )),
        StorageType::Memory => {
            use crate::storage::persistent::memory::MemoryStorageDriver;
            let driver = MemoryStorageDriver::open(path)?;
            Ok(Box::new(driver) as DynStorageDriver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::persistent::traits::StorageTree;
    use tempfile::TempDir;

    #[cfg(feature = "sled-backend")]
    #[test]
    fn test_create_sled_driver() {
        let temp_dir = TempDir::new().unwrap();
        let driver = create_storage_driver(StorageType::Sled, temp_dir.path()).unwrap();
        driver.open_tree("attributes").unwrap().insert(b"k", b"v").unwrap();
        driver.flush().unwrap();
        drop(driver);

        let reopened = create_storage_driver(StorageType::Sled, temp_dir.path()).unwrap();
        let tree = reopened.open_tree("attributes").unwrap();
        assert_eq!(tree.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_create_memory_driver() {
        let temp_dir = TempDir::new().unwrap();
        let driver = create_storage_driver(StorageType::Memory, temp_dir.path()).unwrap();
        driver.open_tree("attributes").unwrap().insert(b"k", b"v").unwrap();
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
