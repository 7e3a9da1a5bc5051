// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed aggregates reconstructed from attribute rows
//!
//! None of these are persisted. They are rebuilt from the attribute store on
//! every query, so every field has a default that stands in for a missing
//! or malformed attribute.

use crate::storage::NodesetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// License a nodeset is published under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum License {
    MIT,
    ApacheLicense20,
    #[default]
    Custom,
}

impl License {
    /// Map a stored attribute value; anything unrecognized is `Custom`
    pub fn from_attribute(value: &str) -> Self {
        match value.trim() {
            v if v.eq_ignore_ascii_case("MIT") => License::MIT,
            v if v.eq_ignore_ascii_case("ApacheLicense20") => License::ApacheLicense20,
            _ => License::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            License::MIT => "MIT",
            License::ApacheLicense20 => "ApacheLicense20",
            License::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category (address space) a nodeset belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub description: String,
    pub icon_url: Option<Url>,
}

/// Contributing organisation
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub name: String,
    pub description: String,
    pub logo_url: Option<Url>,
    pub contact_email: String,
    pub website: Option<Url>,
}

/// Minimal description of one nodeset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesetSummary {
    pub identifier: NodesetId,
    pub namespace_uri: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub version: String,
}

impl NodesetSummary {
    pub fn new(identifier: NodesetId) -> Self {
        Self {
            identifier,
            ..Default::default()
        }
    }
}

/// Everything the catalog knows about one nodeset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceDescriptor {
    pub nodeset: NodesetSummary,
    pub title: String,
    pub license: License,
    pub copyright_text: String,
    pub description: String,
    pub category: Category,
    pub documentation_url: Option<Url>,
    pub icon_url: Option<Url>,
    pub license_url: Option<Url>,
    pub keywords: Vec<String>,
    pub purchasing_information_url: Option<Url>,
    pub release_notes_url: Option<Url>,
    pub test_specification_url: Option<Url>,
    pub supported_locales: Vec<String>,
    pub contributor: Organisation,
    pub number_of_downloads: u32,
}

impl NamespaceDescriptor {
    pub fn new(identifier: NodesetId) -> Self {
        Self {
            nodeset: NodesetSummary::new(identifier),
            ..Default::default()
        }
    }

    pub fn identifier(&self) -> NodesetId {
        self.nodeset.identifier
    }
}

/// One keyword search hit, enriched with summary metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub identifier: NodesetId,
    pub title: String,
    pub contributor: String,
    pub license: String,
    pub version: String,
    pub publication_date: Option<DateTime<Utc>>,
    pub namespace_uri: String,
}
