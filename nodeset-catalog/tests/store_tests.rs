//! Attribute store behaviour through the public API

#[path = "testutils/mod.rs"]
mod testutils;

use nodeset_catalog::catalog::AggregateBuilder;
use nodeset_catalog::storage::CatalogTable;
use nodeset_catalog::{NodesetCatalog, NodesetSummary, QueryParams, TypeKind, TypeRow};
use testutils::catalog_fixture::{CatalogFixture, SAMPLE_XML};

#[test]
fn test_put_then_get_all() {
    let fixture = CatalogFixture::new().expect("Failed to create fixture");
    let store = fixture.catalog().store();

    assert!(store.put(7, "version", "1.0.0"));
    assert_eq!(
        store.get_all(7).get("version").map(String::as_str),
        Some("1.0.0")
    );

    assert!(store.put(7, "version", "1.0.1"));
    let attributes = store.get_all(7);
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes["version"], "1.0.1");
}

#[test]
fn test_summary_build_never_fails_for_stored_ids() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let store = fixture.catalog().store();
    let builder = AggregateBuilder::new(store);

    let ids = store.all_ids();
    assert_eq!(ids.len(), 6);
    for id in ids {
        let summary: NodesetSummary = builder
            .try_build(id)
            .unwrap_or_else(|skip| panic!("nodeset {} skipped: {}", id, skip.reason));
        assert_eq!(summary.identifier, id);
        assert!(summary.namespace_uri.is_some());
    }
}

#[test]
fn test_delete_removes_rows_from_every_table() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let catalog = fixture.catalog();

    assert!(catalog.delete(1));
    for table in CatalogTable::ALL {
        assert!(
            catalog
                .store()
                .rows(table)
                .iter()
                .all(|row| row.nodeset_id != 1),
            "rows of nodeset 1 left in {:?}",
            table
        );
    }

    assert!(catalog.nodeset(1).is_none());
    let rebuilt: NodesetSummary = AggregateBuilder::new(catalog.store())
        .try_build(1)
        .expect("build of a deleted nodeset still succeeds");
    assert_eq!(rebuilt, NodesetSummary::new(1));

    // Other nodesets are untouched
    let remaining = catalog.nodesets(&QueryParams::new().with_limit(100));
    assert_eq!(remaining.len(), 4);
    assert!(catalog.nodeset(2).is_some());
}

#[test]
fn test_closed_store_reopens_transparently() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let catalog = fixture.catalog();

    catalog.close();
    assert!(!catalog.store().is_open());

    let namespace = catalog.namespace(3).expect("nodeset 3 after reopen");
    assert_eq!(namespace.title, "Machinery");
    assert!(catalog.store().is_open());
}

#[test]
fn test_memory_catalog_survives_close() {
    let fixture = CatalogFixture::in_memory().expect("Failed to create fixture");
    fixture.insert_sample_data().expect("Failed to insert samples");
    let catalog = fixture.catalog();

    catalog.close();
    assert_eq!(catalog.nodesets(&QueryParams::new().with_limit(100)).len(), 5);
}

#[test]
fn test_catalog_persists_across_reopen() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog");

    {
        let catalog = NodesetCatalog::from_path(&path).expect("Failed to open catalog");
        catalog.ingest(
            11,
            SAMPLE_XML,
            [("title", "Analyzer Devices"), ("license", "MIT")],
            &[(
                TypeKind::ObjectType,
                TypeRow::new("AnalyserDeviceType", "AnalyserDeviceType", "urn:adi"),
            )],
        );
        assert!(catalog.flush());
    }

    let catalog = NodesetCatalog::from_path(&path).expect("Failed to reopen catalog");
    let descriptor = catalog.namespace(11).expect("nodeset 11 after reopen");
    assert_eq!(descriptor.title, "Analyzer Devices");
    assert_eq!(descriptor.nodeset.namespace_uri.as_deref(), Some("urn:adi"));
    assert_eq!(catalog.download(11).as_deref(), Some(SAMPLE_XML));
}

#[test]
fn test_type_rows_feed_namespace_lookup_by_priority() {
    let fixture = CatalogFixture::new().expect("Failed to create fixture");
    let catalog = fixture.catalog();

    catalog.put_type(
        TypeKind::ReferenceType,
        20,
        &TypeRow::new("HasThing", "HasThing", "urn:reference"),
    );
    assert_eq!(
        catalog.nodeset(20).and_then(|s| s.namespace_uri).as_deref(),
        Some("urn:reference")
    );

    catalog.put_type(
        TypeKind::VariableType,
        20,
        &TypeRow::new("ThingVariable", "ThingVariable", "urn:variable"),
    );
    assert_eq!(
        catalog.nodeset(20).and_then(|s| s.namespace_uri).as_deref(),
        Some("urn:variable")
    );
}

#[cfg(feature = "sled-backend")]
#[test]
fn test_unavailable_store_degrades_to_empty_results() {
    let fixture = CatalogFixture::with_sample_data().expect("Failed to create fixture");
    let catalog = fixture.catalog();
    let everything = QueryParams::new().with_limit(100);

    catalog.close();
    let holder = sled::open(&catalog.config().db_path).expect("Failed to take the database lock");

    assert!(catalog.nodesets(&everything).is_empty());
    assert!(catalog.namespaces(&everything).is_empty());
    assert!(catalog.categories(&everything).is_empty());
    assert!(catalog.search(&["*"]).is_empty());
    assert!(catalog.namespace(1).is_none());
    assert!(!catalog.delete(1));
    assert!(!catalog.store().is_open());

    drop(holder);

    assert_eq!(catalog.nodesets(&everything).len(), 5);
    assert_eq!(
        catalog.namespace(1).map(|descriptor| descriptor.title),
        Some("Robotics".to_string())
    );
}
