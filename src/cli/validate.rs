//! `validate` command

use crate::catalog::{DescriptorValidator, FileReport};
use crate::cli::args::ValidateArgs;
use crate::utils::errors::CatalogResult;
use std::fmt::Write;

/// Returns whether every file passed
pub fn run(args: ValidateArgs) -> CatalogResult<bool> {
    let reports = DescriptorValidator::new().validate_tree(&args.data_dir)?;
    print!("{}", render(&reports));
    Ok(reports.iter().all(FileReport::is_valid))
}

pub fn render(reports: &[FileReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MCP Validation\n==============\n");

    if reports.is_empty() {
        let _ = writeln!(out, "No MCP files found.");
        return out;
    }
    let _ = writeln!(out, "Found {} file(s)\n", reports.len());

    for report in reports {
        if report.is_valid() {
            let _ = writeln!(out, "✓ {}", report.file);
        } else {
            let _ = writeln!(out, "✗ {}", report.file);
            for error in &report.errors {
                let _ = writeln!(out, "    - {}", error);
            }
        }
    }

    let valid = reports.iter().filter(|r| r.is_valid()).count();
    let _ = writeln!(out, "\n---------------------");
    let _ = writeln!(
        out,
        "Total: {} | Valid: {} | Invalid: {}",
        reports.len(),
        valid,
        reports.len() - valid
    );
    out
}
