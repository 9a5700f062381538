//! `list` command

use crate::catalog::{CanonicalDescriptor, CatalogAggregator, DescriptorStatus, Source};
use crate::cli::args::ListArgs;
use crate::cli::load_config;
use crate::utils::errors::CatalogResult;
use std::fmt::Write;

pub fn run(args: ListArgs) -> CatalogResult<()> {
    let config = load_config(args.config.as_deref(), args.data_dir.as_deref())?;
    let catalog = CatalogAggregator::load(&config.catalog.data_dir)?;

    let selected = select(&catalog, args.source, args.service.as_deref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        print!("{}", render(&catalog, &selected));
    }
    Ok(())
}

pub fn select<'a>(
    catalog: &'a CatalogAggregator,
    source: Option<Source>,
    service: Option<&str>,
) -> Vec<&'a CanonicalDescriptor> {
    let base: Vec<&CanonicalDescriptor> = match service {
        Some(service) => catalog.by_service(service).iter().collect(),
        None => catalog.aggregate_all(),
    };
    base.into_iter()
        .filter(|d| source.map_or(true, |s| d.source == s))
        .collect()
}

/// Human-readable listing grouped by service, followed by a summary
pub fn render(catalog: &CatalogAggregator, selected: &[&CanonicalDescriptor]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MCP Catalog\n===========\n");

    let mut shown = 0usize;
    for entry in catalog.registry().entries() {
        let group: Vec<&&CanonicalDescriptor> = selected
            .iter()
            .filter(|d| entry.descriptors.iter().any(|own| own.id == d.id))
            .collect();
        if group.is_empty() {
            continue;
        }
        shown += 1;

        let _ = writeln!(out, "{} ({}/)", entry.meta.display_name, entry.name);
        let _ = writeln!(out, "{}", "-".repeat(40));
        for descriptor in group {
            let badge = match descriptor.source {
                Source::Official => "[official]",
                Source::Community => "[community]",
            };
            let status = match descriptor.status {
                DescriptorStatus::Active => "",
                DescriptorStatus::Deprecated => " (deprecated)",
                DescriptorStatus::Experimental => " (experimental)",
            };
            let _ = writeln!(out, "  {} {} ({}){}", badge, descriptor.name, descriptor.id, status);
            let _ = writeln!(out, "    Transport: {}", descriptor.transport);
        }
        let _ = writeln!(out);
    }

    let official = selected.iter().filter(|d| d.source == Source::Official).count();
    let _ = writeln!(out, "Summary\n-------");
    let _ = writeln!(out, "Total MCPs: {}", selected.len());
    let _ = writeln!(out, "Official: {}", official);
    let _ = writeln!(out, "Community: {}", selected.len() - official);
    let _ = writeln!(out, "Services: {}", shown);
    out
}
