//! Plain-text rendering of a finished run. Secret keys are never printed;
//! they only live in the result document.

use nearmint::RunReport;
use std::{fmt::Write, path::Path};

pub fn render(report: &RunReport, output: &Path) -> String {
    let mut out = String::new();
    let created = report.created().count();
    let failed = report.entries.len() - created;

    let _ = writeln!(out, "Run finished: {created} created, {failed} failed");
    for record in report.created() {
        let _ = writeln!(
            out,
            "  + {} [{:?}] {}",
            record.identifier, record.status, record.public_key
        );
    }
    for failure in report.failed() {
        let _ = writeln!(out, "  - #{}: {}", failure.index, failure.error);
    }

    let doc = &report.document;
    let _ = writeln!(
        out,
        "Document: {} requested, {} created, {} failed in total",
        doc.total_requested, doc.total_created, doc.total_failed
    );
    match &report.persist_error {
        None => {
            let _ = writeln!(out, "Saved to {}", output.display());
        }
        Some(e) => {
            let _ = writeln!(out, "NOT saved to {}: {e}", output.display());
        }
    }
    out
}
