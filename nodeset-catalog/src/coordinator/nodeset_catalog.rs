// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Nodeset catalog - the public entry point
//!
//! Wires the attribute store, the file storage backend and the query
//! components into the listing pipelines:
//!
//! ```text
//! where ──► FilterEvaluator ──► Page ──► AggregateBuilder ──► sort_page
//! ```
//!
//! The page is cut before the built records are sorted, so `orderBy` orders
//! the records of one page rather than choosing which records form it.

use crate::catalog::mapping::names;
use crate::catalog::{
    Aggregate, AggregateBuilder, Category, NamespaceDescriptor, NodesetSummary, Organisation,
    SearchResult,
};
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::filestore::{create_file_storage, nodeset_file_name, FileStorage};
use crate::query::{
    sort_page, FilterEvaluator, KeywordSearch, Orderable, Page, QueryParams,
};
use crate::storage::{AttributeStore, NodesetId, TypeKind, TypeRow};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

/// Metadata catalog over a set of stored nodesets
pub struct NodesetCatalog {
    config: CatalogConfig,
    store: AttributeStore,
    files: Box<dyn FileStorage>,
}

impl NodesetCatalog {
    /// Open the configured store and file backend
    ///
    /// This is the only fallible entry point; once a catalog exists its
    /// queries degrade to empty results instead of failing.
    pub fn open(config: CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;
        let files = create_file_storage(config.file_storage, &config.files_root)?;
        Self::with_file_storage(config, files)
    }

    /// Open with a caller-supplied file backend
    pub fn with_file_storage(
        config: CatalogConfig,
        files: Box<dyn FileStorage>,
    ) -> CatalogResult<Self> {
        config.validate()?;
        let store = AttributeStore::open(config.storage_type, &config.db_path)?;
        info!(
            "Nodeset catalog ready ({} store, {} file storage)",
            config.storage_type,
            files.kind()
        );
        Ok(Self {
            config,
            store,
            files,
        })
    }

    /// Sled store and local blobs under one directory
    pub fn from_path(dir: impl AsRef<Path>) -> CatalogResult<Self> {
        Self::open(CatalogConfig::at_path(dir))
    }

    pub fn in_memory() -> CatalogResult<Self> {
        Self::open(CatalogConfig::in_memory())
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    pub fn files(&self) -> &dyn FileStorage {
        self.files.as_ref()
    }

    fn builder(&self) -> AggregateBuilder<'_> {
        AggregateBuilder::new(&self.store).with_parallel_threshold(self.config.parallel_threshold)
    }

    fn candidates(&self, params: &QueryParams) -> Vec<NodesetId> {
        FilterEvaluator::new(&self.store).candidates(params.where_clause.as_deref())
    }

    fn paged<A: Aggregate + Orderable>(&self, params: &QueryParams) -> Vec<A> {
        let ids = self.candidates(params);
        let page = Page::resolve(params.offset, params.limit, ids.len());
        debug!(
            "Building {} {} record(s) of {} candidate(s)",
            page.len(),
            A::KIND,
            ids.len()
        );

        let mut built = self.builder().build_all::<A>(page.slice(&ids));
        sort_page(&mut built, params.order_by.as_deref());
        built
    }

    /// Distinct values across every candidate, then paged and sorted
    fn distinct_paged<A, F>(&self, params: &QueryParams, is_blank: F) -> Vec<A>
    where
        A: Aggregate + Orderable + Clone + Eq + Hash,
        F: Fn(&A) -> bool,
    {
        let ids = self.candidates(params);
        let mut seen = HashSet::new();
        let distinct: Vec<A> = self
            .builder()
            .build_all::<A>(&ids)
            .into_iter()
            .filter(|value| !is_blank(value) && seen.insert(value.clone()))
            .collect();

        let page = Page::resolve(params.offset, params.limit, distinct.len());
        let mut values = page.slice(&distinct).to_vec();
        sort_page(&mut values, params.order_by.as_deref());
        values
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn nodesets(&self, params: &QueryParams) -> Vec<NodesetSummary> {
        self.paged(params)
    }

    pub fn namespaces(&self, params: &QueryParams) -> Vec<NamespaceDescriptor> {
        self.paged(params)
    }

    /// Distinct categories of the matching nodesets; unnamed ones are left out
    pub fn categories(&self, params: &QueryParams) -> Vec<Category> {
        self.distinct_paged(params, |category: &Category| category.name.trim().is_empty())
    }

    /// Distinct contributing organisations; unnamed ones are left out
    pub fn organisations(&self, params: &QueryParams) -> Vec<Organisation> {
        self.distinct_paged(params, |org: &Organisation| org.name.trim().is_empty())
    }

    pub fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<SearchResult> {
        KeywordSearch::new(&self.store).search(keywords)
    }

    /// Whether any row for `id` exists in any table
    pub fn contains(&self, id: NodesetId) -> bool {
        !self.store.get_all(id).is_empty() || self.store.namespace_uri(id).is_some()
    }

    pub fn namespace(&self, id: NodesetId) -> Option<NamespaceDescriptor> {
        self.single(id)
    }

    pub fn nodeset(&self, id: NodesetId) -> Option<NodesetSummary> {
        self.single(id)
    }

    fn single<A: Aggregate>(&self, id: NodesetId) -> Option<A> {
        if !self.contains(id) {
            return None;
        }
        match self.builder().try_build::<A>(id) {
            Ok(aggregate) => Some(aggregate),
            Err(skip) => {
                warn!("Cannot build {}: {}", A::KIND, CatalogError::from(skip));
                None
            }
        }
    }

    // ---------------------------------------------------------------------
    // Maintenance
    // ---------------------------------------------------------------------

    /// Store a nodeset blob and its metadata rows
    ///
    /// Rows are written one at a time; a failed row is logged and the rest
    /// still go in. Returns the stored blob name, or `None` when the blob
    /// could not be uploaded (in which case no rows are written).
    pub fn ingest<I, K, V>(
        &self,
        id: NodesetId,
        blob: &[u8],
        attributes: I,
        types: &[(TypeKind, TypeRow)],
    ) -> Option<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let stored = match self.files.upload(&nodeset_file_name(id), blob) {
            Some(stored) => stored,
            None => {
                warn!("Ingest of nodeset {} aborted: blob upload failed", id);
                return None;
            }
        };

        let mut failed = 0usize;
        let mut written = 0usize;
        for (name, value) in attributes {
            if self.store.put(id, name.as_ref(), value.as_ref()) {
                written += 1;
            } else {
                failed += 1;
            }
        }
        for (kind, row) in types {
            if self.store.put_type(*kind, id, row) {
                written += 1;
            } else {
                failed += 1;
            }
        }

        if failed > 0 {
            warn!(
                "Nodeset {} ingested with {} of {} row(s) missing",
                id,
                failed,
                written + failed
            );
        } else {
            info!("Ingested nodeset {} as {} ({} rows)", id, stored, written);
        }
        Some(stored)
    }

    /// Fetch a nodeset blob and count the download
    pub fn download(&self, id: NodesetId) -> Option<Vec<u8>> {
        let name = self.files.find(&nodeset_file_name(id))?;
        let content = self.files.download(&name)?;

        let count = self
            .store
            .get(id, names::DOWNLOADS)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(0);
        if !self
            .store
            .put(id, names::DOWNLOADS, &count.saturating_add(1).to_string())
        {
            warn!("Download count of nodeset {} not updated", id);
        }

        Some(content)
    }

    /// Remove every metadata row of a nodeset; the blob is kept
    pub fn delete(&self, id: NodesetId) -> bool {
        let removed = self.store.delete_all(id);
        info!("Deleted nodeset {} (complete: {})", id, removed);
        removed
    }

    pub fn put_attribute(&self, id: NodesetId, name: &str, value: &str) -> bool {
        self.store.put(id, name, value)
    }

    pub fn put_type(&self, kind: TypeKind, id: NodesetId, row: &TypeRow) -> bool {
        self.store.put_type(kind, id, row)
    }

    pub fn flush(&self) -> bool {
        self.store.flush()
    }

    pub fn close(&self) {
        self.store.close()
    }
}

impl std::fmt::Debug for NodesetCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodesetCatalog")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("files", &self.files.kind())
            .finish()
    }
}
