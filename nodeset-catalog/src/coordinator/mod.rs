// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog facade

pub mod nodeset_catalog;

pub use nodeset_catalog::NodesetCatalog;
