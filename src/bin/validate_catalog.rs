//! Validate one or more unit catalogs and report every diagnostic.
//! Run: cargo run --bin validate_catalog -- data/codex.yaml [more.json ...]

use std::path::Path;

use warband::data::validate::{validate_catalog_file, ValidationSeverity};

fn main() {
    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        paths.push(
            Path::new(&manifest_dir)
                .join("data")
                .join("codex.yaml")
                .display()
                .to_string(),
        );
    }

    let mut failed = 0;
    for path in &paths {
        match validate_catalog_file(path) {
            Ok(report) => {
                for diagnostic in &report.diagnostics {
                    eprintln!("[{path}] {diagnostic}");
                }
                println!(
                    "{path}: {} error(s), {} warning(s), {} info",
                    report.count(ValidationSeverity::Error),
                    report.count(ValidationSeverity::Warning),
                    report.count(ValidationSeverity::Info)
                );
                if report.has_errors() {
                    failed += 1;
                }
            }
            Err(err) => {
                eprintln!("[{path}] {err}");
                failed += 1;
            }
        }
    }

    println!("Validated {} catalog(s), {} failed", paths.len(), failed);
    if failed > 0 {
        std::process::exit(1);
    }
}
