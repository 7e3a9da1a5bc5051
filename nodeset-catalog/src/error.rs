// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the nodeset catalog
//!
//! Query operations never return these to callers; they exist so that
//! failures travel as values up to the point where they are logged and
//! degraded. Only opening a catalog reports an error outright.

use crate::storage::{NodesetId, StorageDriverError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageDriverError),

    #[error("Malformed filter expression: {0}")]
    MalformedFilter(String),

    #[error("Unknown comparator: {0}")]
    UnknownComparator(String),

    #[error("Failed to build aggregate for nodeset {id}: {reason}")]
    AggregateFailed { id: NodesetId, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
