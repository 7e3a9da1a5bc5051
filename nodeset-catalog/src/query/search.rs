// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Keyword search across the attribute and type tables

use crate::catalog::mapping::{names, parse_date};
use crate::catalog::SearchResult;
use crate::query::pattern::LikePattern;
use crate::storage::{AttributeStore, CatalogTable, NodesetId};
use log::{debug, warn};
use std::collections::HashSet;

/// Matches every identifier in a table
pub const WILDCARD: &str = "*";

pub struct KeywordSearch<'a> {
    store: &'a AttributeStore,
}

impl<'a> KeywordSearch<'a> {
    pub fn new(store: &'a AttributeStore) -> Self {
        Self { store }
    }

    /// Identifiers matching any keyword in any table, first-seen order
    pub fn matching_ids<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<NodesetId> {
        if keywords.is_empty() {
            return Vec::new();
        }

        let patterns: Vec<Option<LikePattern>> = keywords
            .iter()
            .map(|keyword| {
                let keyword = keyword.as_ref();
                if keyword == WILDCARD {
                    return None;
                }
                match LikePattern::new(&keyword.to_lowercase()) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        warn!("Ignoring keyword '{}': {}", keyword, e);
                        None
                    }
                }
            })
            .collect();

        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for table in CatalogTable::ALL {
            // Rows are fetched lazily, only if some keyword needs a value scan
            let mut rows = None;

            for (keyword, pattern) in keywords.iter().zip(&patterns) {
                let matched: Vec<NodesetId> = match pattern {
                    Some(pattern) => rows
                        .get_or_insert_with(|| self.store.rows(table))
                        .iter()
                        .filter(|row| pattern.is_match(&row.value.to_lowercase()))
                        .map(|row| row.nodeset_id)
                        .collect(),
                    None if keyword.as_ref() == WILDCARD => self.store.distinct_ids(table),
                    None => Vec::new(),
                };

                for id in matched {
                    if seen.insert(id) {
                        ids.push(id);
                    }
                }
            }
        }

        debug!(
            "Keyword search over {} keyword(s) matched {} nodeset(s)",
            keywords.len(),
            ids.len()
        );
        ids
    }

    /// Summary metadata for one match; every field defaults independently
    pub fn enrich(&self, id: NodesetId) -> SearchResult {
        let attributes = self.store.get_all(id);
        let text = |name: &str| attributes.get(name).cloned().unwrap_or_default();

        SearchResult {
            identifier: id,
            title: text(names::TITLE),
            contributor: text(names::ORGANISATION_NAME),
            license: text(names::LICENSE),
            version: text(names::VERSION),
            publication_date: attributes
                .get(names::PUBLICATION_DATE)
                .and_then(|raw| parse_date(raw).ok()),
            namespace_uri: self.store.namespace_uri(id).unwrap_or_default(),
        }
    }

    pub fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<SearchResult> {
        self.matching_ids(keywords)
            .into_iter()
            .map(|id| self.enrich(id))
            .collect()
    }
}
