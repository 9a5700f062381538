//! Offline tooling tests

use mcp_catalog::catalog::{CatalogAggregator, DescriptorValidator, Source};
use mcp_catalog::cli::{list, validate};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bundled() -> CatalogAggregator {
    CatalogAggregator::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/mcps")).unwrap()
}

#[test]
fn test_list_filters() {
    let catalog = bundled();

    let all = list::select(&catalog, None, None);
    assert_eq!(all.len(), catalog.aggregate_all().len());

    let community = list::select(&catalog, Some(Source::Community), None);
    assert!(community.iter().all(|d| d.source == Source::Community));

    let docling = list::select(&catalog, None, Some("docling"));
    assert_eq!(docling.len(), 1);
    assert!(list::select(&catalog, None, Some("unknown")).is_empty());
}

#[test]
fn test_list_render() {
    let catalog = bundled();
    let selected = list::select(&catalog, Some(Source::Official), None);
    let out = list::render(&catalog, &selected);

    assert!(out.contains("Docling (docling/)"));
    assert!(out.contains("[official] Docling (docling)"));
    assert!(out.contains("Transport: streamable-http"));
    assert!(!out.contains("(filesystem/)"));
    assert!(out.contains(&format!("Total MCPs: {}", selected.len())));
}

#[test]
fn test_bundled_tree_validates() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/mcps");
    let reports = DescriptorValidator::new().validate_tree(&root).unwrap();
    for report in &reports {
        assert!(report.is_valid(), "{}: {:?}", report.file, report.errors);
    }
}

#[test]
fn test_validate_reports_every_file() {
    let dir = TempDir::new().unwrap();
    let service = dir.path().join("alpha");
    fs::create_dir_all(&service).unwrap();
    fs::write(
        service.join("_meta.json"),
        json!({
            "service": "alpha",
            "displayName": "Alpha",
            "description": "fixture",
            "website": null,
            "icon": "box",
            "category": "testing"
        })
        .to_string(),
    )
    .unwrap();
    fs::write(service.join("broken.json"), "{").unwrap();
    fs::write(
        service.join("mismatch.json"),
        json!({
            "id": "alpha-mismatch",
            "name": "Mismatch",
            "description": "fixture",
            "category": "testing",
            "icon": "box",
            "source": "official",
            "version": "1",
            "transport": "sse",
            "configuration": { "template": { "command": "npx", "args": [], "env": {} } }
        })
        .to_string(),
    )
    .unwrap();

    let reports = DescriptorValidator::new().validate_tree(dir.path()).unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports.iter().filter(|r| !r.is_valid()).count(), 2);

    let out = validate::render(&reports);
    assert!(out.contains("✓ alpha/_meta.json"));
    assert!(out.contains("✗ alpha/broken.json"));
    assert!(out.contains("Total: 3 | Valid: 1 | Invalid: 2"));
}
