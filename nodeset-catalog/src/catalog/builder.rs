// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Aggregate builder
//!
//! Turns the attribute rows of one nodeset into a typed aggregate. Field
//! problems are absorbed (the field keeps its default); only a failure to
//! fetch the rows at all turns into a [`Skip`], which drops that one record
//! from whatever result it was headed for.

use super::mapping::ATTRIBUTE_MAPPINGS;
use super::model::{Category, NamespaceDescriptor, NodesetSummary, Organisation};
use crate::error::CatalogError;
use crate::storage::{AttributeStore, NodesetId};
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashMap;

/// Why a record was left out of a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub id: NodesetId,
    pub reason: String,
}

impl From<Skip> for CatalogError {
    fn from(skip: Skip) -> Self {
        CatalogError::AggregateFailed {
            id: skip.id,
            reason: skip.reason,
        }
    }
}

/// A typed object that can be rebuilt from one nodeset's attribute rows
pub trait Aggregate: Sized + Send {
    /// Name used in logs
    const KIND: &'static str;

    /// Whether the namespace URI lookup has to run for this aggregate
    const NEEDS_NAMESPACE: bool;

    fn from_descriptor(descriptor: NamespaceDescriptor) -> Self;
}

impl Aggregate for NamespaceDescriptor {
    const KIND: &'static str = "namespace";
    const NEEDS_NAMESPACE: bool = true;

    fn from_descriptor(descriptor: NamespaceDescriptor) -> Self {
        descriptor
    }
}

impl Aggregate for NodesetSummary {
    const KIND: &'static str = "nodeset";
    const NEEDS_NAMESPACE: bool = true;

    fn from_descriptor(descriptor: NamespaceDescriptor) -> Self {
        descriptor.nodeset
    }
}

impl Aggregate for Category {
    const KIND: &'static str = "category";
    const NEEDS_NAMESPACE: bool = false;

    fn from_descriptor(descriptor: NamespaceDescriptor) -> Self {
        descriptor.category
    }
}

impl Aggregate for Organisation {
    const KIND: &'static str = "organisation";
    const NEEDS_NAMESPACE: bool = false;

    fn from_descriptor(descriptor: NamespaceDescriptor) -> Self {
        descriptor.contributor
    }
}

/// Apply every recognized attribute in `attributes` to a fresh descriptor
///
/// Unknown attribute names are ignored; malformed values leave the target
/// field at its default.
pub fn descriptor_from_attributes(
    id: NodesetId,
    attributes: &HashMap<String, String>,
    namespace_uri: Option<String>,
) -> NamespaceDescriptor {
    let mut descriptor = NamespaceDescriptor::new(id);
    descriptor.nodeset.namespace_uri = namespace_uri;

    for mapping in ATTRIBUTE_MAPPINGS.iter() {
        if let Some(raw) = attributes.get(mapping.attribute) {
            if let Err(e) = mapping.apply(&mut descriptor, raw) {
                debug!(
                    "Nodeset {}: ignoring {} ({}): {}",
                    id, mapping.field, mapping.attribute, e
                );
            }
        }
    }

    descriptor
}

/// Rows fetched for one identifier, ready to be turned into an aggregate
struct Fetched {
    id: NodesetId,
    attributes: HashMap<String, String>,
    namespace_uri: Option<String>,
}

/// Builds aggregates against one attribute store
pub struct AggregateBuilder<'a> {
    store: &'a AttributeStore,
    parallel_threshold: usize,
}

impl<'a> AggregateBuilder<'a> {
    pub fn new(store: &'a AttributeStore) -> Self {
        Self {
            store,
            parallel_threshold: usize::MAX,
        }
    }

    /// Build in parallel once a batch holds at least `threshold` records
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    fn fetch<A: Aggregate>(&self, id: NodesetId) -> Result<Fetched, Skip> {
        let attributes = self.store.try_get_all(id).map_err(|e| Skip {
            id,
            reason: e.to_string(),
        })?;
        let namespace_uri = if A::NEEDS_NAMESPACE {
            self.store.namespace_uri(id)
        } else {
            None
        };
        Ok(Fetched {
            id,
            attributes,
            namespace_uri,
        })
    }

    fn assemble<A: Aggregate>(fetched: Fetched) -> A {
        A::from_descriptor(descriptor_from_attributes(
            fetched.id,
            &fetched.attributes,
            fetched.namespace_uri,
        ))
    }

    /// Build one aggregate, or say why it was skipped
    pub fn try_build<A: Aggregate>(&self, id: NodesetId) -> Result<A, Skip> {
        self.fetch::<A>(id).map(Self::assemble)
    }

    /// Build one aggregate per identifier, in input order, dropping records
    /// whose rows could not be fetched
    pub fn build_all<A: Aggregate>(&self, ids: &[NodesetId]) -> Vec<A> {
        // Store access is serialized, so fetch sequentially and only
        // parallelize the pure assembly step
        let fetched: Vec<Fetched> = ids
            .iter()
            .map(|id| self.fetch::<A>(*id))
            .filter_map(|outcome| match outcome {
                Ok(fetched) => Some(fetched),
                Err(skip) => {
                    warn!("Dropping {} from result: {}", A::KIND, CatalogError::from(skip));
                    None
                }
            })
            .collect();

        if fetched.len() >= self.parallel_threshold {
            fetched.into_par_iter().map(Self::assemble).collect()
        } else {
            fetched.into_iter().map(Self::assemble).collect()
        }
    }
}
