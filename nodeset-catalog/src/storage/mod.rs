// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Attribute storage for the nodeset catalog
//!
//! This module provides:
//! - Pluggable key/value drivers (sled, memory)
//! - The table layout for attribute and type-kind rows
//! - [`AttributeStore`], the row-level accessor used by every query

pub mod attribute_store;
pub(crate) mod persistent;
pub mod tables;

pub use attribute_store::AttributeStore;
pub use persistent::{StorageDriverError, StorageResult, StorageType};
pub use tables::{CatalogTable, NodesetId, TableRow, TypeKind, TypeRow};
