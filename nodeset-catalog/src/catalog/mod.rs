// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed aggregates and how they are rebuilt from attribute rows

pub mod builder;
pub mod mapping;
pub mod model;

pub use builder::{descriptor_from_attributes, Aggregate, AggregateBuilder, Skip};
pub use mapping::{AttributeMapping, FieldError, ATTRIBUTE_MAPPINGS};
pub use model::{
    Category, License, NamespaceDescriptor, NodesetSummary, Organisation, SearchResult,
};
