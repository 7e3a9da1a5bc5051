// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Nodeset Catalog - metadata query engine for OPC UA nodeset packages
//!
//! Nodeset files are kept as opaque blobs; what is known about each one
//! (title, license, dates, organisation, declared types) lives as flat
//! attribute rows keyed by nodeset identifier. The catalog rebuilds typed
//! aggregates from those rows on every query.
//!
//! # Features
//!
//! - **Filtering**: OR-combined `equals` / `contains` / `like` clauses
//! - **Paging and ordering**: offset/limit windows, named multi-key sorts
//! - **Keyword search**: across attributes and the four type tables
//! - **Embedded storage**: sled on disk, or memory for tests
//!
//! # Usage
//!
//! ```no_run
//! use nodeset_catalog::{NodesetCatalog, QueryParams};
//!
//! let catalog = NodesetCatalog::from_path("./catalog").expect("open catalog");
//! let params = QueryParams::new()
//!     .with_where(r#"[{"field": "license", "comparator": "equals", "value": "MIT"}]"#)
//!     .with_order_by("publicationDate");
//!
//! for nodeset in catalog.nodesets(&params) {
//!     println!("{} {:?}", nodeset.identifier, nodeset.namespace_uri);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod filestore;
pub mod query;
pub mod storage;

// Re-export the public API - NodesetCatalog is the main entry point
pub use catalog::{
    Category, License, NamespaceDescriptor, NodesetSummary, Organisation, SearchResult,
};
pub use config::CatalogConfig;
pub use coordinator::NodesetCatalog;
pub use error::{CatalogError, CatalogResult};
pub use filestore::{FileStorage, FileStorageKind};
pub use query::{Clause, Comparator, FilterExpression, QueryParams};
pub use storage::{AttributeStore, NodesetId, StorageType, TypeKind, TypeRow};

/// Nodeset catalog version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nodeset catalog crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
