//! Keyword search tests

#[path = "testutils/mod.rs"]
mod testutils;

use chrono::{Datelike, TimeZone, Utc};
use nodeset_catalog::NodesetId;
use testutils::catalog_fixture::{CatalogFixture, TYPE_ONLY_ID};

fn hits(fixture: &CatalogFixture, keywords: &[&str]) -> Vec<NodesetId> {
    fixture
        .catalog()
        .search(keywords)
        .into_iter()
        .map(|r| r.identifier)
        .collect()
}

#[test]
fn test_wildcard_returns_every_identifier() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let mut all = hits(&fixture, &["*"]);
    all.sort_unstable();
    assert_eq!(all, vec![1, 2, 3, 4, 5, TYPE_ONLY_ID]);
}

#[test]
fn test_empty_keywords_return_nothing() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    assert!(hits(&fixture, &[]).is_empty());
}

#[test]
fn test_keyword_is_case_insensitive_substring() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    assert_eq!(hits(&fixture, &["ROBOT"]), vec![1]);
    assert_eq!(hits(&fixture, &["machin"]), vec![2, 3]);
    assert_eq!(hits(&fixture, &["euromap"]), vec![5]);
}

#[test]
fn test_type_tables_are_searched() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let results = fixture.catalog().search(&["genericdevice"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].identifier, TYPE_ONLY_ID);
    assert_eq!(results[0].title, "");
    assert_eq!(results[0].namespace_uri, "urn:generic");
}

#[test]
fn test_results_are_deduplicated_in_first_seen_order() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    assert_eq!(hits(&fixture, &["packaging", "robot", "robotics"]), vec![4, 1]);
}

#[test]
fn test_results_are_enriched() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let results = fixture.catalog().search(&["Machinery"]);
    let machinery = results
        .iter()
        .find(|r| r.identifier == 3)
        .expect("Machinery nodeset should match");

    assert_eq!(machinery.title, "Machinery");
    assert_eq!(machinery.contributor, "OPC Foundation");
    assert_eq!(machinery.license, "ApacheLicense20");
    assert_eq!(machinery.version, "1.2.0");
    assert_eq!(
        machinery.publication_date,
        Some(Utc.with_ymd_and_hms(2022, 10, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        machinery.namespace_uri,
        "http://opcfoundation.org/UA/Machinery/"
    );
    assert_eq!(machinery.publication_date.map(|d| d.month()), Some(10));
}
