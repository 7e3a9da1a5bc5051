// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Attribute store - row-level access to the catalog tables
//!
//! Owns the single driver connection. Every operation first makes sure the
//! connection is open, reopening it when it was closed or dropped after a
//! failure, and retries once on a fresh connection. Access is serialized
//! through a mutex so one store can be shared between threads.
//!
//! Two flavours of each read exist: `try_*` returns the driver error, the
//! plain method logs it and degrades to an empty result. Query pipelines use
//! the plain methods except where a whole-record failure must be observed.

use super::persistent::memory::MemoryStorageDriver;
use super::persistent::{
    create_storage_driver, DynStorageDriver, StorageDriverError, StorageResult, StorageTree,
    StorageType,
};
use super::tables::{
    id_prefix, row_key, split_key, CatalogTable, NodesetId, TableRow, TypeKind, TypeRow,
};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Opens a fresh driver connection; called again after every close
pub(crate) type Connector = Box<dyn Fn() -> StorageResult<DynStorageDriver> + Send + Sync>;

/// Row-level accessor over the attribute and type-kind tables
pub struct AttributeStore {
    storage_type: StorageType,
    path: PathBuf,
    connector: Connector,
    connection: Mutex<Option<DynStorageDriver>>,
}

impl AttributeStore {
    /// Open a store, creating every catalog table up front
    pub fn open<P: AsRef<Path>>(storage_type: StorageType, path: P) -> StorageResult<Self> {
        info!(
            "Opening attribute store with {} at path: {:?}",
            storage_type,
            path.as_ref()
        );

        let path = path.as_ref().to_path_buf();
        let connector: Connector = match storage_type {
            StorageType::Memory => {
                // Reconnects clone this handle, so data outlives a close
                let memory = MemoryStorageDriver::new();
                Box::new(move || Ok(Box::new(memory.clone()) as DynStorageDriver))
            }
            other => {
                let path = path.clone();
                Box::new(move || create_storage_driver(other, &path))
            }
        };

        Self::with_connector(storage_type, path, connector)
    }

    pub(crate) fn with_connector(
        storage_type: StorageType,
        path: PathBuf,
        connector: Connector,
    ) -> StorageResult<Self> {
        let store = Self {
            storage_type,
            path,
            connector,
            connection: Mutex::new(None),
        };

        store.with_connection(|driver| {
            for table in CatalogTable::ALL {
                driver.open_tree(table.tree_name())?;
                debug!("Pre-created tree: {}", table.tree_name());
            }
            Ok(())
        })?;

        Ok(store)
    }

    /// In-memory store for tests and ephemeral catalogs
    pub fn in_memory() -> StorageResult<Self> {
        Self::open(StorageType::Memory, "")
    }

    /// Run `op` against an open connection, reopening and retrying once
    fn with_connection<T>(
        &self,
        mut op: impl FnMut(&DynStorageDriver) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut guard = self.connection.lock();

        for attempt in 0..2 {
            if guard.is_none() {
                debug!("Opening attribute store connection (attempt {})", attempt + 1);
                match (self.connector)() {
                    Ok(driver) => *guard = Some(driver),
                    Err(e) => {
                        error!("Attribute store unavailable: {}", e);
                        return Err(StorageDriverError::Unavailable(e.to_string()));
                    }
                }
            }

            let driver = match guard.as_ref() {
                Some(driver) => driver,
                None => break,
            };

            match op(driver) {
                Ok(value) => return Ok(value),
                Err(e) if attempt == 0 => {
                    warn!(
                        "Attribute store operation failed, retrying on a fresh connection: {}",
                        e
                    );
                    // Drop the driver first so sled releases its file lock
                    *guard = None;
                }
                Err(e) => return Err(e),
            }
        }

        Err(StorageDriverError::Unavailable(
            "connection could not be established".to_string(),
        ))
    }

    /// Close the connection; the next operation reopens it
    pub fn close(&self) {
        let mut guard = self.connection.lock();
        if let Some(driver) = guard.take() {
            if let Err(e) = driver.flush() {
                warn!("Failed to flush attribute store on close: {}", e);
            }
            debug!("Attribute store connection closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection.lock().is_some()
    }

    pub fn flush(&self) -> bool {
        match self.with_connection(|driver| driver.flush()) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to flush attribute store: {}", e);
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Attribute rows
    // ---------------------------------------------------------------------

    pub fn try_get(&self, id: NodesetId, name: &str) -> StorageResult<Option<String>> {
        let key = row_key(id, name);
        self.with_connection(|driver| {
            let tree = driver.open_tree(CatalogTable::Attributes.tree_name())?;
            Ok(tree
                .get(&key)?
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
        })
    }

    /// Value of one attribute, `None` when absent or the store is unavailable
    pub fn get(&self, id: NodesetId, name: &str) -> Option<String> {
        self.try_get(id, name).unwrap_or_else(|e| {
            error!("Failed to read attribute '{}' of nodeset {}: {}", name, id, e);
            None
        })
    }

    /// All attributes of one nodeset; fails as a whole on a store error
    pub fn try_get_all(&self, id: NodesetId) -> StorageResult<HashMap<String, String>> {
        self.with_connection(|driver| {
            let tree = driver.open_tree(CatalogTable::Attributes.tree_name())?;
            let mut attributes = HashMap::new();
            for item in tree.scan_prefix(&id_prefix(id))? {
                let (key, value) = item?;
                if let Some((_, name)) = split_key(&key) {
                    attributes.insert(name, String::from_utf8_lossy(&value).into_owned());
                }
            }
            Ok(attributes)
        })
    }

    pub fn get_all(&self, id: NodesetId) -> HashMap<String, String> {
        self.try_get_all(id).unwrap_or_else(|e| {
            error!("Failed to read attributes of nodeset {}: {}", id, e);
            HashMap::new()
        })
    }

    /// Insert or update one attribute
    pub fn put(&self, id: NodesetId, name: &str, value: &str) -> bool {
        let key = row_key(id, name);
        let result = self.with_connection(|driver| {
            driver
                .open_tree(CatalogTable::Attributes.tree_name())?
                .insert(&key, value.as_bytes())
        });
        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to write attribute '{}' of nodeset {}: {}", name, id, e);
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Type-kind rows
    // ---------------------------------------------------------------------

    /// Insert or update one type row, keyed by browse name
    pub fn put_type(&self, kind: TypeKind, id: NodesetId, row: &TypeRow) -> bool {
        let key = row_key(id, &row.browse_name);
        let result = self.with_connection(|driver| {
            let data = bincode::serialize(row)?;
            driver.open_tree(kind.table().tree_name())?.insert(&key, &data)
        });
        match result {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to write {:?} '{}' of nodeset {}: {}",
                    kind, row.browse_name, id, e
                );
                false
            }
        }
    }

    /// Namespace URI of the first type row found for `id`, checking the
    /// type-kind tables in [`TypeKind::PRIORITY`] order
    pub fn namespace_uri(&self, id: NodesetId) -> Option<String> {
        let result = self.with_connection(|driver| {
            for kind in TypeKind::PRIORITY {
                let tree = driver.open_tree(kind.table().tree_name())?;
                let first = tree.scan_prefix(&id_prefix(id))?.next().transpose()?;
                if let Some((_, data)) = first {
                    let row: TypeRow = bincode::deserialize(&data)?;
                    return Ok(Some(row.namespace_uri));
                }
            }
            Ok(None)
        });

        result.unwrap_or_else(|e| {
            warn!("Failed to resolve namespace URI of nodeset {}: {}", id, e);
            None
        })
    }

    // ---------------------------------------------------------------------
    // Scans
    // ---------------------------------------------------------------------

    /// Every row of one table, in key order
    pub fn try_rows(&self, table: CatalogTable) -> StorageResult<Vec<TableRow>> {
        self.with_connection(|driver| {
            let tree = driver.open_tree(table.tree_name())?;
            let mut rows = Vec::new();
            for item in tree.iter()? {
                let (key, data) = item?;
                let (nodeset_id, name) = match split_key(&key) {
                    Some(parts) => parts,
                    None => {
                        warn!("Skipping malformed key in '{}'", table.tree_name());
                        continue;
                    }
                };
                let value = if table.is_type_table() {
                    let row: TypeRow = bincode::deserialize(&data)?;
                    row.value
                } else {
                    String::from_utf8_lossy(&data).into_owned()
                };
                rows.push(TableRow {
                    nodeset_id,
                    name,
                    value,
                });
            }
            Ok(rows)
        })
    }

    pub fn rows(&self, table: CatalogTable) -> Vec<TableRow> {
        self.try_rows(table).unwrap_or_else(|e| {
            error!("Failed to scan '{}': {}", table.tree_name(), e);
            Vec::new()
        })
    }

    /// Distinct identifiers present in one table, ascending
    pub fn distinct_ids(&self, table: CatalogTable) -> Vec<NodesetId> {
        let result = self.with_connection(|driver| {
            let tree = driver.open_tree(table.tree_name())?;
            let mut ids: Vec<NodesetId> = Vec::new();
            for item in tree.iter()? {
                let (key, _) = item?;
                if let Some((id, _)) = split_key(&key) {
                    // Keys are sorted, so duplicates are adjacent
                    if ids.last() != Some(&id) {
                        ids.push(id);
                    }
                }
            }
            Ok(ids)
        });

        result.unwrap_or_else(|e| {
            error!("Failed to list identifiers in '{}': {}", table.tree_name(), e);
            Vec::new()
        })
    }

    // ---------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------

    /// Remove every row of `id` from every table
    ///
    /// Best effort: a failing table does not stop the others and nothing is
    /// rolled back. Returns `false` if any table could not be cleared.
    pub fn delete_all(&self, id: NodesetId) -> bool {
        let mut all_ok = true;

        for table in CatalogTable::ALL {
            let result = self.with_connection(|driver| {
                let tree = driver.open_tree(table.tree_name())?;
                let keys: Vec<Vec<u8>> = tree
                    .scan_prefix(&id_prefix(id))?
                    .map(|item| item.map(|(key, _)| key))
                    .collect::<StorageResult<_>>()?;
                let refs: Vec<&[u8]> = keys.iter().map(Vec::as_slice).collect();
                tree.batch_remove(&refs)?;
                Ok(keys.len())
            });

            match result {
                Ok(removed) => debug!(
                    "Removed {} rows of nodeset {} from '{}'",
                    removed,
                    id,
                    table.tree_name()
                ),
                Err(e) => {
                    error!(
                        "Failed to delete nodeset {} from '{}': {}",
                        id,
                        table.tree_name(),
                        e
                    );
                    all_ok = false;
                }
            }
        }

        all_ok
    }

    /// Identifiers present in any table
    pub fn all_ids(&self) -> HashSet<NodesetId> {
        CatalogTable::ALL
            .iter()
            .flat_map(|table| self.distinct_ids(*table))
            .collect()
    }
}

impl std::fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeStore")
            .field("storage_type", &self.storage_type)
            .field("path", &self.path)
            .field("is_open", &self.is_open())
            .finish()
    }
}
