// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver traits
//!
//! Every backend exposes named trees (one per catalog table) of ordered
//! byte keys. The attribute store relies on keys being iterated in
//! ascending byte order so that rows of one nodeset are contiguous.

use super::types::StorageResult;
use std::path::Path;

/// Iterator over `(key, value)` pairs of a tree
pub type TreeIter<'a> = Box<dyn Iterator<Item = StorageResult<(Vec<u8>, Vec<u8>)>> + 'a>;

/// A named, ordered key/value collection (a table)
pub trait StorageTree: Send + Sync {
    /// Insert or overwrite a key
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Iterate over all pairs in ascending key order
    fn iter(&self) -> StorageResult<TreeIter<'_>>;

    /// Iterate over the pairs whose key starts with `prefix`, ascending
    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<TreeIter<'_>>;

    /// Remove multiple keys
    fn batch_remove(&self, keys: &[&[u8]]) -> StorageResult<()>;
}

/// Main storage driver trait
pub trait StorageDriver: Send + Sync {
    type Tree: StorageTree;

    /// Open or create a storage driver at the given path
    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self>
    where
        Self: Sized;

    /// Open or create a named tree
    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree>;

    /// Persist pending writes
    fn flush(&self) -> StorageResult<()>;
}

impl StorageTree for Box<dyn StorageTree> {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        (**self).insert(key, value)
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn iter(&self) -> StorageResult<TreeIter<'_>> {
        (**self).iter()
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<TreeIter<'_>> {
        (**self).scan_prefix(prefix)
    }

    fn batch_remove(&self, keys: &[&[u8]]) -> StorageResult<()> {
        (**self).batch_remove(keys)
    }
}

/// Boxed driver handle shared by the store
pub type DynStorageDriver = Box<dyn StorageDriver<Tree = Box<dyn StorageTree>>>;
