// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Caller-facing query parameters

use serde::{Deserialize, Serialize};

/// Paging, filtering and ordering arguments of a listing query
///
/// `limit` and `offset` stay signed so that out-of-range input reaches
/// [`Page::resolve`](super::Page::resolve) and yields an empty page
/// instead of failing at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    pub limit: i64,
    pub offset: i64,
    #[serde(rename = "where")]
    pub where_clause: Option<String>,
    pub order_by: Option<String>,
    pub keywords: Vec<String>,
}

impl QueryParams {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_where(mut self, expression: impl Into<String>) -> Self {
        self.where_clause = Some(expression.into());
        self
    }

    pub fn with_order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by = Some(key.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
            where_clause: None,
            order_by: None,
            keywords: Vec::new(),
        }
    }
}
