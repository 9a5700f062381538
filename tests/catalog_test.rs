//! Registry loading and aggregation tests

use mcp_catalog::catalog::{CatalogAggregator, ServiceRegistry, Source, Transport};
use mcp_catalog::utils::errors::CatalogError;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn meta(service: &str) -> Value {
    json!({
        "service": service,
        "displayName": service.to_uppercase(),
        "description": format!("{} service", service),
        "website": format!("https://{}.example.com", service),
        "icon": "box",
        "category": "testing"
    })
}

fn descriptor(id: &str, source: &str) -> Value {
    json!({
        "id": id,
        "name": id,
        "description": format!("{} descriptor", id),
        "category": "testing",
        "icon": "box",
        "source": source,
        "version": "1.0.0",
        "transport": "stdio",
        "configuration": {
            "template": { "command": "npx", "args": ["-y", id], "env": {} }
        }
    })
}

fn write(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// alpha: two descriptors, beta: one
fn alpha_beta() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("alpha/_meta.json"), &meta("alpha"));
    write(&root.join("alpha/one.json"), &descriptor("alpha-one", "official"));
    write(&root.join("alpha/two.json"), &descriptor("alpha-two", "community"));
    write(&root.join("beta/_meta.json"), &meta("beta"));
    write(&root.join("beta/one.json"), &descriptor("beta-one", "official"));
    dir
}

#[test]
fn test_alpha_beta_catalog() {
    let dir = alpha_beta();
    let catalog = CatalogAggregator::load(dir.path()).unwrap();

    assert_eq!(catalog.aggregate_all().len(), 3);
    assert_eq!(catalog.service_names(), vec!["alpha", "beta"]);

    let counts = catalog.count_by_source();
    assert_eq!(counts.official, 2);
    assert_eq!(counts.community, 1);
    assert_eq!(counts.total(), catalog.aggregate_all().len());
}

#[test]
fn test_lookup_properties() {
    let dir = alpha_beta();
    let catalog = CatalogAggregator::load(dir.path()).unwrap();

    for d in catalog.aggregate_all() {
        assert_eq!(catalog.by_id(&d.id).map(|found| found.id.as_str()), Some(d.id.as_str()));
    }
    assert!(catalog.by_id("gamma-one").is_none());
    assert!(catalog.by_service("unknown").is_empty());
    assert_eq!(catalog.by_service("alpha").len(), 2);
    assert_eq!(catalog.by_source(Source::Community).len(), 1);
}

#[test]
fn test_enumeration_order_is_sorted() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("zeta/_meta.json"), &meta("zeta"));
    write(&root.join("zeta/b.json"), &descriptor("zeta-b", "official"));
    write(&root.join("zeta/a.json"), &descriptor("zeta-a", "official"));
    write(&root.join("eta/_meta.json"), &meta("eta"));
    write(&root.join("eta/x.json"), &descriptor("eta-x", "official"));

    let catalog = CatalogAggregator::load(root).unwrap();
    let ids: Vec<&str> = catalog.aggregate_all().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["eta-x", "zeta-a", "zeta-b"]);
}

#[test]
fn test_reserved_and_orphan_files_are_ignored() {
    let dir = alpha_beta();
    let root = dir.path();
    write(&root.join("alpha/_draft.json"), &descriptor("draft", "official"));
    write(&root.join("orphan/one.json"), &descriptor("orphan-one", "official"));

    let catalog = CatalogAggregator::load(root).unwrap();
    assert_eq!(catalog.aggregate_all().len(), 3);
    assert!(catalog.by_id("draft").is_none());
    assert!(catalog.by_id("orphan-one").is_none());
    assert!(catalog.service_meta("orphan").is_none());
}

#[test]
fn test_service_without_descriptors_is_listed() {
    let dir = alpha_beta();
    write(&dir.path().join("gamma/_meta.json"), &meta("gamma"));

    let catalog = CatalogAggregator::load(dir.path()).unwrap();
    assert_eq!(catalog.service_names(), vec!["alpha", "beta", "gamma"]);
    assert!(catalog.by_service("gamma").is_empty());
    assert_eq!(catalog.services().len(), 3);
}

#[test]
fn test_malformed_file_fails_build() {
    let dir = alpha_beta();
    fs::write(dir.path().join("beta/broken.json"), "{ not json").unwrap();

    let err = ServiceRegistry::build(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidDescriptor { .. }));
}

#[test]
fn test_transport_mismatch_fails_build() {
    let dir = alpha_beta();
    let mut bad = descriptor("beta-two", "official");
    bad["transport"] = json!("sse");
    write(&dir.path().join("beta/two.json"), &bad);

    assert!(matches!(
        ServiceRegistry::build(dir.path()),
        Err(CatalogError::InvalidDescriptor { .. })
    ));
}

#[test]
fn test_duplicate_id_fails_build() {
    let dir = alpha_beta();
    write(&dir.path().join("beta/copy.json"), &descriptor("alpha-one", "official"));

    match ServiceRegistry::build(dir.path()) {
        Err(CatalogError::DuplicateDescriptorId { id, first_service, .. }) => {
            assert_eq!(id, "alpha-one");
            assert_eq!(first_service, "alpha");
        }
        other => panic!("expected duplicate id error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_bundled_data_loads() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/mcps");
    let catalog = CatalogAggregator::load(&root).unwrap();

    assert!(catalog.service_names().contains(&"docling"));
    let context7 = catalog.by_id("context7").unwrap();
    assert_eq!(context7.transport, Transport::StreamableHttp);
    assert!(context7.template().as_http().is_some());
}
