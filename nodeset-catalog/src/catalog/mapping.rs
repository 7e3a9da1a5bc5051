// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Attribute name → aggregate field mapping
//!
//! The table below is the only place that knows which stored attribute
//! feeds which field. Each entry pairs an attribute name with a setter that
//! parses the raw value; a parse failure leaves the field at its default.
//! Recognizing a new attribute is one more entry.

use super::model::{License, NamespaceDescriptor};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use thiserror::Error;
use url::Url;

/// A single attribute value that could not be parsed into its field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FieldError(String);

type Setter = fn(&mut NamespaceDescriptor, &str) -> Result<(), FieldError>;

/// One recognized attribute
pub struct AttributeMapping {
    /// Stored attribute name
    pub attribute: &'static str,
    /// Public field name, used in logs and as a filter alias target
    pub field: &'static str,
    apply: Setter,
}

impl AttributeMapping {
    fn new(attribute: &'static str, field: &'static str, apply: Setter) -> Self {
        Self {
            attribute,
            field,
            apply,
        }
    }

    pub fn apply(&self, target: &mut NamespaceDescriptor, raw: &str) -> Result<(), FieldError> {
        (self.apply)(target, raw)
    }
}

pub static ATTRIBUTE_MAPPINGS: Lazy<Vec<AttributeMapping>> = Lazy::new(|| {
    vec![
        AttributeMapping::new("nodesetcreationtime", "publicationDate", |d, v| {
            d.nodeset.publication_date = Some(parse_date(v)?);
            Ok(())
        }),
        AttributeMapping::new("nodesetmodifiedtime", "lastModified", |d, v| {
            d.nodeset.last_modified = Some(parse_date(v)?);
            Ok(())
        }),
        AttributeMapping::new("version", "version", |d, v| {
            d.nodeset.version = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("title", "title", |d, v| {
            d.title = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("license", "license", |d, v| {
            d.license = License::from_attribute(v);
            Ok(())
        }),
        AttributeMapping::new("copyright", "copyrightText", |d, v| {
            d.copyright_text = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("description", "description", |d, v| {
            d.description = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("addressspacename", "category.name", |d, v| {
            d.category.name = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("addressspacedescription", "category.description", |d, v| {
            d.category.description = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("addressspaceiconurl", "category.iconUrl", |d, v| {
            d.category.icon_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("documentationurl", "documentationUrl", |d, v| {
            d.documentation_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("iconurl", "iconUrl", |d, v| {
            d.icon_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("licenseurl", "licenseUrl", |d, v| {
            d.license_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("purchasinginfo", "purchasingInformationUrl", |d, v| {
            d.purchasing_information_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("releasenotes", "releaseNotesUrl", |d, v| {
            d.release_notes_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("testspecification", "testSpecificationUrl", |d, v| {
            d.test_specification_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("keywords", "keywords", |d, v| {
            d.keywords = split_list(v);
            Ok(())
        }),
        AttributeMapping::new("locales", "supportedLocales", |d, v| {
            d.supported_locales = split_list(v);
            Ok(())
        }),
        AttributeMapping::new("orgname", "contributor.name", |d, v| {
            d.contributor.name = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("orgdescription", "contributor.description", |d, v| {
            d.contributor.description = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("orglogo", "contributor.logoUrl", |d, v| {
            d.contributor.logo_url = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("orgcontact", "contributor.contactEmail", |d, v| {
            d.contributor.contact_email = v.to_string();
            Ok(())
        }),
        AttributeMapping::new("orgwebsite", "contributor.website", |d, v| {
            d.contributor.website = Some(parse_url(v)?);
            Ok(())
        }),
        AttributeMapping::new("numdownloads", "numberOfDownloads", |d, v| {
            d.number_of_downloads = parse_count(v)?;
            Ok(())
        }),
    ]
});

/// Stored attribute names with a well-known meaning
pub mod names {
    pub const PUBLICATION_DATE: &str = "nodesetcreationtime";
    pub const LAST_MODIFIED: &str = "nodesetmodifiedtime";
    pub const VERSION: &str = "version";
    pub const TITLE: &str = "title";
    pub const LICENSE: &str = "license";
    pub const ORGANISATION_NAME: &str = "orgname";
    pub const DOWNLOADS: &str = "numdownloads";
}

/// Parse a date without depending on the process locale
///
/// Accepts RFC 3339, ISO-like `YYYY-MM-DD[ T]HH:MM:SS`, the invariant
/// culture `MM/DD/YYYY HH:MM:SS`, and a bare `YYYY-MM-DD`. Naive values are
/// taken as UTC.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, FieldError> {
    const NAIVE_FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%m/%d/%Y %H:%M:%S",
    ];

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(FieldError(format!("unrecognized date '{}'", raw)))
}

pub fn parse_url(raw: &str) -> Result<Url, FieldError> {
    Url::parse(raw.trim()).map_err(|e| FieldError(format!("invalid URL '{}': {}", raw, e)))
}

fn parse_count(raw: &str) -> Result<u32, FieldError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| FieldError(format!("invalid count '{}': {}", raw, e)))
}

/// Split a comma-separated attribute into trimmed, non-empty entries
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::collections::HashSet;

    #[test]
    fn test_attribute_names_are_unique() {
        let names: HashSet<&str> = ATTRIBUTE_MAPPINGS.iter().map(|m| m.attribute).collect();
        assert_eq!(names.len(), ATTRIBUTE_MAPPINGS.len());
    }

    #[test]
    fn test_parse_date_formats() {
        let rfc = parse_date("2023-05-01T10:20:30+02:00").unwrap();
        assert_eq!(rfc.hour(), 8);

        let invariant = parse_date("05/01/2023 10:20:30").unwrap();
        assert_eq!((invariant.month(), invariant.day()), (5, 1));

        let bare = parse_date("2021-12-24").unwrap();
        assert_eq!((bare.year(), bare.hour()), (2021, 0));

        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2023-13-45").is_err());
    }

    #[test]
    fn test_split_list_drops_empty_entries() {
        assert_eq!(
            split_list(" en, de,,fr ,"),
            vec!["en".to_string(), "de".to_string(), "fr".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        assert!(parse_url("not a url").is_err());
        assert!(parse_url("https://opcfoundation.org/").is_ok());
    }
}
