//! Pagination and ordering tests
//!
//! The page is cut from the candidate list first; ordering then sorts the
//! records of that page only.

#[path = "testutils/mod.rs"]
mod testutils;

use nodeset_catalog::{NodesetId, NodesetSummary, QueryParams};
use testutils::catalog_fixture::CatalogFixture;

fn ids(summaries: &[NodesetSummary]) -> Vec<NodesetId> {
    summaries.iter().map(|s| s.identifier).collect()
}

fn page(fixture: &CatalogFixture, offset: i64, limit: i64) -> Vec<NodesetId> {
    let params = QueryParams::new().with_offset(offset).with_limit(limit);
    ids(&fixture.catalog().nodesets(&params))
}

#[test]
fn test_page_bounds() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");

    assert!(page(&fixture, 0, 0).is_empty());
    assert!(page(&fixture, 5, 10).is_empty());
    assert!(page(&fixture, 6, 10).is_empty());
    assert!(page(&fixture, -1, 10).is_empty());
    assert!(page(&fixture, 0, -1).is_empty());

    assert_eq!(page(&fixture, 0, 2), vec![1, 2]);
    assert_eq!(page(&fixture, 3, 10), vec![4, 5]);
    assert_eq!(page(&fixture, 0, i64::MAX), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_ordering_sorts_within_the_page() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");

    let first_page = QueryParams::new()
        .with_limit(2)
        .with_order_by("publicationDate");
    assert_eq!(ids(&fixture.catalog().nodesets(&first_page)), vec![2, 1]);

    let everything = QueryParams::new()
        .with_limit(100)
        .with_order_by("publicationDate");
    assert_eq!(
        ids(&fixture.catalog().nodesets(&everything)),
        vec![5, 3, 2, 1, 4]
    );
}

#[test]
fn test_ties_use_secondary_order() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");

    // Nodesets 2 and 4 share version 1.0.0; 2 was published later
    let params = QueryParams::new().with_limit(100).with_order_by("version");
    assert_eq!(
        ids(&fixture.catalog().nodesets(&params)),
        vec![3, 5, 1, 2, 4]
    );
}

#[test]
fn test_descriptor_ordering_keys() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");

    let params = QueryParams::new().with_limit(100).with_order_by("Title");
    let titles: Vec<String> = fixture
        .catalog()
        .namespaces(&params)
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "Robotics",
            "Plastics and Rubber",
            "Packaging",
            "Machinery",
            "Machine Tools"
        ]
    );
}

#[test]
fn test_unknown_key_keeps_candidate_order() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let params = QueryParams::new().with_limit(100).with_order_by("popularity");
    assert_eq!(
        ids(&fixture.catalog().nodesets(&params)),
        vec![1, 2, 3, 4, 5]
    );
}

#[test]
fn test_distinct_organisations_paged_and_ordered() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");

    let names = |params: &QueryParams| -> Vec<String> {
        fixture
            .catalog()
            .organisations(params)
            .into_iter()
            .map(|o| o.name)
            .collect()
    };

    assert_eq!(
        names(&QueryParams::new().with_limit(2)),
        vec!["VDMA", "OPC Foundation"]
    );
    assert_eq!(
        names(&QueryParams::new().with_limit(100).with_order_by("name")),
        vec!["VDMA", "OPC Foundation", "OMAC", "EUROMAP"]
    );
}

#[test]
fn test_categories_follow_filter() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let params = QueryParams::new()
        .with_limit(100)
        .with_where("orgname equals VDMA");
    let names: Vec<String> = fixture
        .catalog()
        .categories(&params)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Robotics", "Machine Tools"]);
}
