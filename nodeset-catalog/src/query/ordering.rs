// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Named multi-key ordering of built pages
//!
//! Each aggregate kind names the keys it can be sorted by and a fixed
//! secondary order used to break ties. Sorting is descending on every key.

use crate::catalog::{Category, NamespaceDescriptor, NodesetSummary, Organisation};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::cmp::Ordering;

/// A comparable projection of one field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(u64),
    Text(String),
    Date(Option<DateTime<Utc>>),
}

impl SortValue {
    fn text(value: impl AsRef<str>) -> Self {
        SortValue::Text(value.as_ref().to_string())
    }
}

pub trait Orderable {
    /// Keys accepted in `orderBy`
    const KEYS: &'static [&'static str];

    /// Tie-breaking keys, in order
    const SECONDARY: &'static [&'static str];

    /// Value of a canonical key; `None` for keys this kind does not know
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

/// Case-insensitive lookup of a requested key
pub fn canonical_key<O: Orderable>(requested: &str) -> Option<&'static str> {
    let requested = requested.trim();
    O::KEYS
        .iter()
        .copied()
        .find(|key| key.eq_ignore_ascii_case(requested))
}

fn compare_descending<O: Orderable>(a: &O, b: &O, keys: &[&str]) -> Ordering {
    for key in keys {
        let ordering = b.sort_value(key).cmp(&a.sort_value(key));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Sort a built page in place
///
/// With no key the page keeps its candidate order. An unknown key also
/// leaves it untouched.
pub fn sort_page<O: Orderable>(page: &mut [O], order_by: Option<&str>) {
    let requested = match order_by.map(str::trim) {
        Some(requested) if !requested.is_empty() => requested,
        _ => return,
    };

    let primary = match canonical_key::<O>(requested) {
        Some(key) => key,
        None => {
            warn!(
                "Unknown ordering key '{}', expected one of {:?}",
                requested,
                O::KEYS
            );
            return;
        }
    };

    let keys: Vec<&str> = std::iter::once(primary)
        .chain(O::SECONDARY.iter().copied().filter(|key| *key != primary))
        .collect();
    debug!("Ordering {} record(s) by {:?}", page.len(), keys);

    page.sort_by(|a, b| compare_descending(a, b, &keys));
}

impl Orderable for NodesetSummary {
    const KEYS: &'static [&'static str] = &[
        "identifier",
        "namespaceUri",
        "publicationDate",
        "lastModified",
        "version",
    ];
    const SECONDARY: &'static [&'static str] = &["publicationDate", "version", "identifier"];

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        let value = match key {
            "identifier" => SortValue::Number(u64::from(self.identifier)),
            "namespaceUri" => SortValue::text(self.namespace_uri.as_deref().unwrap_or_default()),
            "publicationDate" => SortValue::Date(self.publication_date),
            "lastModified" => SortValue::Date(self.last_modified),
            "version" => SortValue::text(&self.version),
            _ => return None,
        };
        Some(value)
    }
}

impl Orderable for NamespaceDescriptor {
    const KEYS: &'static [&'static str] = &[
        "identifier",
        "namespaceUri",
        "publicationDate",
        "lastModified",
        "version",
        "title",
        "license",
        "category",
        "contributor",
        "numberOfDownloads",
    ];
    const SECONDARY: &'static [&'static str] = &["publicationDate", "title", "identifier"];

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        let value = match key {
            "title" => SortValue::text(&self.title),
            "license" => SortValue::text(self.license.as_str()),
            "category" => SortValue::text(&self.category.name),
            "contributor" => SortValue::text(&self.contributor.name),
            "numberOfDownloads" => SortValue::Number(u64::from(self.number_of_downloads)),
            other => return self.nodeset.sort_value(other),
        };
        Some(value)
    }
}

impl Orderable for Category {
    const KEYS: &'static [&'static str] = &["name", "description"];
    const SECONDARY: &'static [&'static str] = &["name", "description"];

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "description" => Some(SortValue::text(&self.description)),
            _ => None,
        }
    }
}

impl Orderable for Organisation {
    const KEYS: &'static [&'static str] = &["name", "website", "contactEmail"];
    const SECONDARY: &'static [&'static str] = &["name", "website"];

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "website" => Some(SortValue::text(
                self.website.as_ref().map(|url| url.as_str()).unwrap_or_default(),
            )),
            "contactEmail" => Some(SortValue::text(&self.contact_email)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mapping::parse_date;

    fn summary(id: u32, date: Option<&str>, version: &str) -> NodesetSummary {
        let mut s = NodesetSummary::new(id);
        s.publication_date = date.map(|d| parse_date(d).unwrap());
        s.version = version.to_string();
        s
    }

    fn ids(page: &[NodesetSummary]) -> Vec<u32> {
        page.iter().map(|s| s.identifier).collect()
    }

    #[test]
    fn test_sort_descending_by_requested_key() {
        let mut page = vec![
            summary(1, Some("2020-01-01"), "1.0"),
            summary(2, Some("2022-01-01"), "1.0"),
            summary(3, None, "1.0"),
        ];
        sort_page(&mut page, Some("publicationDate"));
        assert_eq!(ids(&page), vec![2, 1, 3]);
    }

    #[test]
    fn test_key_is_case_insensitive_and_ties_use_secondary_order() {
        let mut page = vec![
            summary(1, Some("2021-01-01"), "1.0"),
            summary(2, Some("2021-01-01"), "2.0"),
            summary(3, Some("2021-01-01"), "2.0"),
        ];
        sort_page(&mut page, Some("PUBLICATIONDATE"));
        assert_eq!(ids(&page), vec![3, 2, 1]);
    }

    #[test]
    fn test_unknown_or_missing_key_keeps_candidate_order() {
        let mut page = vec![summary(2, None, "1"), summary(9, None, "3"), summary(5, None, "2")];
        sort_page(&mut page, Some("popularity"));
        assert_eq!(ids(&page), vec![2, 9, 5]);
        sort_page(&mut page, None);
        assert_eq!(ids(&page), vec![2, 9, 5]);
    }

    #[test]
    fn test_descriptor_keys() {
        let mut a = NamespaceDescriptor::new(1);
        a.title = "Alpha".to_string();
        a.number_of_downloads = 5;
        let mut b = NamespaceDescriptor::new(2);
        b.title = "Beta".to_string();
        b.number_of_downloads = 50;

        let mut page = vec![a, b];
        sort_page(&mut page, Some("title"));
        assert_eq!(page[0].identifier(), 2);
        sort_page(&mut page, Some("numberofdownloads"));
        assert_eq!(page[0].identifier(), 2);
        sort_page(&mut page, Some("identifier"));
        assert_eq!(page[0].identifier(), 2);
    }

    #[test]
    fn test_category_and_organisation_keys() {
        assert_eq!(canonical_key::<Category>("Name"), Some("name"));
        assert_eq!(canonical_key::<Organisation>("contactemail"), Some("contactEmail"));
        assert_eq!(canonical_key::<Organisation>("title"), None);
    }
}
