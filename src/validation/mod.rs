//! Catalog validation.
//!
//! Checks a loaded catalog for problems that would not stop a mosaic but
//! probably surprise the user: orphaned emojis, shared ids, missing images.
//! Used by `discmos preview` and `discmos mosaic`.

mod checks;
mod diagnostic;

pub use checks::check_images;
pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::output::{plural, Printer};
use crate::types::Catalog;

/// Run all catalog checks.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_empty_catalog(catalog));
    result.merge(checks::check_orphaned_emojis(catalog));
    result.merge(checks::check_empty_servers(catalog));
    result.merge(checks::check_duplicate_ids(catalog));
    result.merge(checks::check_duplicate_names(catalog));

    result
}

/// Print diagnostics to stderr, followed by a summary line if there were any.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("{}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }

    if result.is_ok() {
        return;
    }

    let summary = format!(
        "{}, {}",
        plural(result.error_count(), "error", "errors"),
        plural(result.warning_count(), "warning", "warnings")
    );
    if result.has_errors() {
        printer.error("Checked", &summary);
    } else {
        printer.warning("Checked", &summary);
    }
}
