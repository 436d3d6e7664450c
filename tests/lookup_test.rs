//! Tests for catalog query operations: digest and name lookup, snapshots.

mod common;

use std::fs;
use std::path::Path;

use simcat_core::store::ManifestProbe;
use simcat_core::ModelCatalog;
use tempfile::tempdir;

use common::{manifest_json, write_store_file};

fn catalog_with_models() -> (tempfile::TempDir, ModelCatalog) {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    write_store_file(&a, "road", &manifest_json("digest-road", "Road", "en"));
    write_store_file(&b, "rail", &manifest_json("digest-rail", "Rail", "fr"));

    let catalog = ModelCatalog::new(Box::new(ManifestProbe::new()));
    catalog.refresh(dir.path(), Path::new("")).unwrap();
    (dir, catalog)
}

#[test]
fn test_all_digests_in_registry_order() {
    let (_dir, catalog) = catalog_with_models();
    assert_eq!(catalog.all_digests(), vec!["digest-road", "digest-rail"]);
}

#[test]
fn test_all_basics_snapshot() {
    let (_dir, catalog) = catalog_with_models();
    let basics = catalog.all_basics();
    assert_eq!(basics.len(), 2);
    assert_eq!(basics[0].name, "Road");
    assert_eq!(basics[1].name, "Rail");
    assert!(basics.iter().all(|b| !b.log_enabled));
}

#[test]
fn test_basic_by_digest_exact() {
    let (_dir, catalog) = catalog_with_models();
    let basic = catalog.basic_by_digest("digest-rail").unwrap();
    assert_eq!(basic.name, "Rail");
    assert!(catalog.basic_by_digest("Rail").is_none());
}

#[test]
fn test_lookup_falls_back_to_name() {
    let (_dir, catalog) = catalog_with_models();
    // No digest equals "Road", but an entry is named "Road".
    let basic = catalog.basic_by_digest_or_name("Road").unwrap();
    assert_eq!(basic.digest, "digest-road");
}

#[test]
fn test_lookup_prefers_digest_over_name() {
    let (_dir, catalog) = catalog_with_models();
    let basic = catalog.basic_by_digest_or_name("digest-rail").unwrap();
    assert_eq!(basic.name, "Rail");
}

#[test]
fn test_lookup_unknown_token() {
    let (_dir, catalog) = catalog_with_models();
    assert!(catalog.basic_by_digest_or_name("nothing").is_none());
}

#[test]
fn test_queries_on_empty_catalog() {
    let catalog = ModelCatalog::new(Box::new(ManifestProbe::new()));
    assert!(catalog.all_digests().is_empty());
    assert!(catalog.all_basics().is_empty());
    assert!(catalog.basic_by_digest("x").is_none());
    assert!(catalog.basic_by_digest_or_name("x").is_none());
    assert_eq!(catalog.model_count(), 0);

    let (root, enabled) = catalog.root_dir();
    assert!(root.as_os_str().is_empty());
    assert!(!enabled);
}
